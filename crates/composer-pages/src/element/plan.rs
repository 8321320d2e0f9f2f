//! The visit plan shared by the three render backends.
//!
//! Every intrinsic descriptor is planned exactly once per traversal by
//! [`plan_element`]. The plan decides whether the element carries the
//! owning component's id, which attributes it gets and which reference it
//! registers. Backends only turn plans into output:
//!
//! | Backend | id | attributes | reference |
//! |---------|----|------------|-----------|
//! | serialize | `id="..."` | emitted as text | `data-ref` only |
//! | construct | set on the new node, node becomes root | set on the node | registered |
//! | bind | root looked up by id | none | looked up and registered |
//!
//! After an element and all of its children are processed,
//! [`finish_element`] resets the first-element flag unless the element is a
//! child of the component root. The reset is post-order, so siblings of a
//! component root can claim an id again.

use std::borrow::Cow;

use super::descriptor::{Child, Flat, flatten};
use super::util::{is_void_element, to_dash_case};
use crate::component::{ComponentBase, ComponentInstance, PropValue, Props};
use crate::dom::DomElement;
use crate::error::Result;
use crate::logging::Diagnostics;
use crate::settings::ReferencePolicy;

/// Attribute carrying a reference name in markup.
pub const REFERENCE_ATTRIBUTE: &str = "data-ref";

enum Owner<'a> {
	Component(&'a mut ComponentBase),
	Detached(&'a mut Vec<ComponentInstance>),
}

/// State passed down a traversal: the owning component and whether the
/// current descriptor sits below that component's root.
pub struct TraversalContext<'a> {
	owner: Owner<'a>,
	child_of_root: bool,
	diagnostics: &'a Diagnostics,
	policy: ReferencePolicy,
}

impl<'a> TraversalContext<'a> {
	/// Context with no owning component.
	///
	/// Components created by top-level custom descriptors are collected
	/// into `components`.
	pub fn detached(
		components: &'a mut Vec<ComponentInstance>,
		diagnostics: &'a Diagnostics,
		policy: ReferencePolicy,
	) -> Self {
		Self {
			owner: Owner::Detached(components),
			child_of_root: false,
			diagnostics,
			policy,
		}
	}

	/// Context owned by `base`.
	pub fn for_component(
		base: &'a mut ComponentBase,
		diagnostics: &'a Diagnostics,
		policy: ReferencePolicy,
	) -> Self {
		Self {
			owner: Owner::Component(base),
			child_of_root: false,
			diagnostics,
			policy,
		}
	}

	/// Makes `base` the owning component.
	pub fn with_component(mut self, base: &'a mut ComponentBase) -> Self {
		self.owner = Owner::Component(base);
		self
	}

	/// Marks the current descriptor as sitting below the component root.
	pub fn mark_as_child_of_root(&mut self) {
		self.child_of_root = true;
	}

	/// Whether the current descriptor sits below the component root.
	pub fn is_child_of_root(&self) -> bool {
		self.child_of_root
	}

	/// The owning component, if any.
	pub fn component(&self) -> Option<&ComponentBase> {
		match &self.owner {
			Owner::Component(base) => Some(&**base),
			Owner::Detached(_) => None,
		}
	}

	/// Mutable access to the owning component.
	pub fn component_mut(&mut self) -> Option<&mut ComponentBase> {
		match &mut self.owner {
			Owner::Component(base) => Some(&mut **base),
			Owner::Detached(_) => None,
		}
	}

	/// Diagnostics of this traversal.
	pub fn diagnostics(&self) -> &'a Diagnostics {
		self.diagnostics
	}

	/// Duplicate reference policy of this traversal.
	pub fn policy(&self) -> ReferencePolicy {
		self.policy
	}

	/// Context for a child descriptor: same owner, marked child of root.
	pub fn child(&mut self) -> TraversalContext<'_> {
		let owner = match &mut self.owner {
			Owner::Component(base) => Owner::Component(&mut **base),
			Owner::Detached(components) => Owner::Detached(&mut **components),
		};
		TraversalContext {
			owner,
			child_of_root: true,
			diagnostics: self.diagnostics,
			policy: self.policy,
		}
	}

	/// Records a nested component instance with the owner.
	pub fn adopt(&mut self, instance: ComponentInstance) {
		match &mut self.owner {
			Owner::Component(base) => base.adopt(instance),
			Owner::Detached(components) => components.push(instance),
		}
	}

	/// Registers `element` in the owner's reference table.
	///
	/// Without an owning component there is no table and nothing happens.
	pub fn register_reference(&mut self, reference: &str, element: DomElement) -> Result<()> {
		let diagnostics = self.diagnostics;
		let policy = self.policy;
		match self.component_mut() {
			Some(base) => base.register_reference(reference, element, diagnostics, policy),
			None => Ok(()),
		}
	}
}

/// How an attribute appears in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue<'d> {
	/// `name="value"`.
	Text(&'d str),
	/// A bare boolean attribute.
	Present,
}

impl<'d> AttrValue<'d> {
	/// Value written to a live node. Bare attributes get an empty value.
	pub fn dom_value(&self) -> &'d str {
		match self {
			Self::Text(value) => value,
			Self::Present => "",
		}
	}
}

/// Decisions for one intrinsic descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPlan<'d> {
	/// Tag name.
	pub tag: &'d str,
	/// The owning component's id, when this element is its root.
	pub id: Option<String>,
	/// Attributes in prop order, names already dash-cased.
	pub attributes: Vec<(Cow<'d, str>, AttrValue<'d>)>,
	/// Reference name to register.
	pub reference: Option<&'d str>,
	/// Whether the tag is a void element.
	pub is_void: bool,
}

/// Plans an intrinsic element and claims the root id when it is free.
pub fn plan_element<'d>(tag: &'d str, props: &'d Props, cx: &mut TraversalContext<'_>) -> ElementPlan<'d> {
	let id = match cx.component_mut() {
		Some(base) if !base.has_rendered_first_element => {
			base.has_rendered_first_element = true;
			Some(base.id().to_string())
		}
		_ => None,
	};

	let reference = props.get_str("ref");
	let mut attributes: Vec<(Cow<'d, str>, AttrValue<'d>)> = Vec::with_capacity(props.len());
	for (name, value) in props.iter() {
		let (name, value) = match (name, value) {
			("id", _) => continue,
			("ref", PropValue::Str(target)) => {
				push_attribute(&mut attributes, Cow::Borrowed(REFERENCE_ATTRIBUTE), AttrValue::Text(target.as_str()));
				continue;
			}
			("ref", _) => continue,
			(_, PropValue::Str(value)) => (to_dash_case(name), AttrValue::Text(value.as_str())),
			(_, PropValue::Bool(_)) => (to_dash_case(name), AttrValue::Present),
			(_, PropValue::Number(_) | PropValue::Json(_)) => continue,
		};
		// `ref` owns `data-ref`; `id` belongs to the component root.
		if name == "id" || (name == REFERENCE_ATTRIBUTE && reference.is_some()) {
			continue;
		}
		push_attribute(&mut attributes, name, value);
	}

	ElementPlan {
		tag,
		id,
		attributes,
		reference,
		is_void: is_void_element(tag),
	}
}

/// Adds an attribute, replacing the value of an earlier one with the same
/// name in place, as `set_attribute` does on a live node.
fn push_attribute<'d>(
	attributes: &mut Vec<(Cow<'d, str>, AttrValue<'d>)>,
	name: Cow<'d, str>,
	value: AttrValue<'d>,
) {
	match attributes.iter_mut().find(|(existing, _)| *existing == name) {
		Some((_, existing)) => *existing = value,
		None => attributes.push((name, value)),
	}
}

/// Children a backend visits for a planned element.
///
/// Void elements have none; declared children are dropped with a log.
pub(crate) fn plan_children<'d>(
	plan: &ElementPlan<'_>,
	children: &'d [Child],
	diagnostics: &Diagnostics,
) -> Vec<Flat<'d>> {
	if plan.is_void {
		if !children.is_empty() {
			diagnostics.log("Children of void element <{0}> are ignored.", &[&plan.tag]);
		}
		return Vec::new();
	}
	flatten(children)
}

/// Post-order step after an element and its children are processed.
pub fn finish_element(cx: &mut TraversalContext<'_>) {
	if cx.is_child_of_root() {
		return;
	}
	if let Some(base) = cx.component_mut() {
		base.has_rendered_first_element = false;
	}
}
