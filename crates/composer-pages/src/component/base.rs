//! Per-instance bookkeeping shared by every component.

use std::collections::HashMap;

use super::instance::ComponentInstance;
use super::props::Props;
use crate::dom::DomElement;
use crate::element::Child;
use crate::error::{ComponentError, Result};
use crate::logging::Diagnostics;
use crate::settings::ReferencePolicy;

/// The kind of traversal a component is taking part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
	/// Serialize to an HTML string.
	Serialize,
	/// Create live DOM nodes.
	Construct,
	/// Bind to DOM produced by an earlier serialization.
	Bind,
}

impl RenderMode {
	/// Name used in traces.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Serialize => "serialize",
			Self::Construct => "construct",
			Self::Bind => "bind",
		}
	}
}

/// Identity and render bookkeeping of one component instance.
#[derive(Debug)]
pub struct ComponentBase {
	name: &'static str,
	id: String,
	props: Props,
	children: Vec<Child>,
	root: Option<DomElement>,
	elements: HashMap<String, DomElement>,
	custom_elements: Vec<ComponentInstance>,
	reference_visits: HashMap<String, usize>,
	pub(crate) has_rendered_first_element: bool,
	has_bound_dom: bool,
}

impl ComponentBase {
	/// Creates the bookkeeping for a component named `name`.
	///
	/// Fails with [`ComponentError::MissingId`] when `props` has no string `id`.
	pub fn new(name: &'static str, props: Props, children: Vec<Child>) -> Result<Self> {
		let id = props
			.id()
			.ok_or_else(|| ComponentError::MissingId {
				component: name.to_string(),
			})?
			.to_string();
		Ok(Self {
			name,
			id,
			props,
			children,
			root: None,
			elements: HashMap::new(),
			custom_elements: Vec::new(),
			reference_visits: HashMap::new(),
			has_rendered_first_element: false,
			has_bound_dom: false,
		})
	}

	/// Name of the component type.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// The component id, also emitted on its root element.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Current props.
	pub fn props(&self) -> &Props {
		&self.props
	}

	/// Replaces the props. The new props must carry an `id`.
	pub fn set_props(&mut self, props: Props) -> Result<()> {
		let id = props.id().ok_or_else(|| ComponentError::MissingId {
			component: self.name.to_string(),
		})?;
		self.id = id.to_string();
		self.props = props;
		Ok(())
	}

	/// Children passed to the constructor.
	pub fn children(&self) -> &[Child] {
		&self.children
	}

	/// The root element, once constructed or bound.
	pub fn root(&self) -> Option<&DomElement> {
		self.root.as_ref()
	}

	pub(crate) fn set_root(&mut self, root: DomElement) {
		self.root = Some(root);
	}

	/// Detaches the root element from its parent.
	///
	/// The element stays recorded as the root so it can be re-attached.
	pub fn detach_root(&mut self) {
		if let Some(root) = &self.root {
			root.remove();
		}
	}

	/// Element registered under a reference name.
	pub fn element(&self, reference: &str) -> Option<&DomElement> {
		self.elements.get(reference)
	}

	/// The whole reference table.
	pub fn elements(&self) -> &HashMap<String, DomElement> {
		&self.elements
	}

	/// Registers `element` under `reference`.
	///
	/// An existing entry is replaced with a warning under
	/// [`ReferencePolicy::LastWins`] and rejected under
	/// [`ReferencePolicy::Reject`].
	pub fn register_reference(
		&mut self,
		reference: &str,
		element: DomElement,
		diagnostics: &Diagnostics,
		policy: ReferencePolicy,
	) -> Result<()> {
		if self.elements.contains_key(reference) {
			match policy {
				ReferencePolicy::LastWins => diagnostics.warn(
					"You are overriding the element reference '{0}'.",
					&[&reference],
				),
				ReferencePolicy::Reject => {
					return Err(diagnostics.error(ComponentError::DuplicateReference {
						reference: reference.to_string(),
					}));
				}
			}
		}
		self.elements.insert(reference.to_string(), element);
		Ok(())
	}

	/// Counts a visit of `reference` in the current pass and returns how
	/// many earlier visits there were.
	pub(crate) fn visit_reference(&mut self, reference: &str) -> usize {
		let visits = self.reference_visits.entry(reference.to_string()).or_insert(0);
		let earlier = *visits;
		*visits += 1;
		earlier
	}

	/// Nested component instances found in the last traversal.
	pub fn custom_elements(&self) -> &[ComponentInstance] {
		&self.custom_elements
	}

	/// Mutable access to the nested component instances.
	pub fn custom_elements_mut(&mut self) -> &mut [ComponentInstance] {
		&mut self.custom_elements
	}

	pub(crate) fn adopt(&mut self, instance: ComponentInstance) {
		self.custom_elements.push(instance);
	}

	/// Whether the root id has been claimed in the current traversal.
	pub fn has_rendered_first_element(&self) -> bool {
		self.has_rendered_first_element
	}

	/// Whether the last bind pass completed.
	pub fn has_bound_dom(&self) -> bool {
		self.has_bound_dom
	}

	pub(crate) fn set_bound_dom(&mut self, bound: bool) {
		self.has_bound_dom = bound;
	}

	/// Resets per-pass state before a traversal.
	///
	/// Serialization keeps the root and references of an earlier pass,
	/// since it creates no nodes.
	pub(crate) fn begin_pass(&mut self, mode: RenderMode) {
		self.has_rendered_first_element = false;
		self.custom_elements.clear();
		self.reference_visits.clear();
		if mode != RenderMode::Serialize {
			self.root = None;
			self.elements.clear();
			self.has_bound_dom = false;
		}
	}
}
