//! A component paired with its bookkeeping.

use std::collections::HashMap;
use std::fmt;

use super::base::ComponentBase;
use super::props::Props;
use super::r#trait::{AsAny, Component};
use super::request::FetchRequest;
use crate::dom::{Document, DocumentFragment, DomElement};
use crate::element::{Child, Descriptor};
use crate::error::Result;
use crate::render::Renderer;

/// A live component: its [`ComponentBase`] plus the boxed user view.
pub struct ComponentInstance {
	pub(crate) base: ComponentBase,
	pub(crate) view: Box<dyn Component>,
}

impl ComponentInstance {
	/// Constructs a `C` from props and constructor children.
	///
	/// Fails with `MissingId` before the view is constructed when `props`
	/// carries no string `id`.
	pub fn new<C: Component>(props: Props, children: Vec<Child>) -> Result<Self> {
		let base = ComponentBase::new(C::name(), props, children)?;
		let view = C::construct(base.props(), base.children());
		Ok(Self {
			base,
			view: Box::new(view),
		})
	}

	/// Name of the component type.
	pub fn name(&self) -> &'static str {
		self.base.name()
	}

	/// The component id.
	pub fn id(&self) -> &str {
		self.base.id()
	}

	/// Bookkeeping of this instance.
	pub fn base(&self) -> &ComponentBase {
		&self.base
	}

	/// Mutable bookkeeping of this instance.
	pub fn base_mut(&mut self) -> &mut ComponentBase {
		&mut self.base
	}

	/// Downcasts the view to the concrete component type.
	pub fn view<C: Component>(&self) -> Option<&C> {
		AsAny::as_any(&*self.view).downcast_ref::<C>()
	}

	/// Mutable downcast of the view.
	pub fn view_mut<C: Component>(&mut self) -> Option<&mut C> {
		AsAny::as_any_mut(&mut *self.view).downcast_mut::<C>()
	}

	/// Whether the view is a `C`.
	pub fn is<C: Component>(&self) -> bool {
		self.view::<C>().is_some()
	}

	/// Renders the view to a descriptor tree.
	pub fn render(&self) -> Descriptor {
		self.view.render(&self.base)
	}

	/// The root element, once constructed or bound.
	pub fn root(&self) -> Option<&DomElement> {
		self.base.root()
	}

	/// Element registered under `reference`.
	pub fn element(&self, reference: &str) -> Option<&DomElement> {
		self.base.element(reference)
	}

	/// The reference table.
	pub fn elements(&self) -> &HashMap<String, DomElement> {
		self.base.elements()
	}

	/// Nested component instances found in the last traversal.
	pub fn custom_elements(&self) -> &[ComponentInstance] {
		self.base.custom_elements()
	}

	/// Runs the `fetch` hook, replacing props when it returns new ones.
	pub async fn fetch(&mut self, request: &FetchRequest) -> Result<()> {
		tracing::debug!(component = self.name(), path = %request.path, "fetch");
		if let Some(props) = self.view.fetch(&self.base, request).await? {
			self.base.set_props(props)?;
		}
		Ok(())
	}

	/// Runs the `show` hook.
	pub async fn show(&mut self) -> Result<()> {
		self.view.show(&self.base).await
	}

	/// Runs the `hide` hook.
	pub async fn hide(&mut self) -> Result<()> {
		self.view.hide(&self.base).await
	}

	/// Runs the `remove` hook.
	pub async fn remove(&mut self) -> Result<()> {
		self.view.remove(&mut self.base).await
	}

	/// Runs the `bind_interactions` hook.
	pub fn bind_interactions(&mut self) {
		self.view.bind_interactions(&self.base);
	}

	/// Serializes this component with the default renderer.
	pub fn render_to_string(&mut self) -> Result<String> {
		Renderer::default().render_component_to_string(self)
	}

	/// Constructs live nodes for this component with the default renderer.
	pub fn construct_as_dom(&mut self, document: &Document) -> Result<DocumentFragment> {
		Renderer::default().construct_component(self, document)
	}

	/// Binds this component to existing markup with the default renderer.
	pub fn bind_to_existing_dom(&mut self, document: &Document) -> Result<()> {
		Renderer::default().bind_component(self, document)
	}
}

impl fmt::Debug for ComponentInstance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentInstance")
			.field("name", &self.name())
			.field("id", &self.id())
			.field("base", &self.base)
			.finish()
	}
}
