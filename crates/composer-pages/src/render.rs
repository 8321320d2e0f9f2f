//! Render entry point.

use crate::component::ComponentInstance;
use crate::dom::{self, Document, DocumentFragment};
use crate::element::{Descriptor, TraversalContext};
use crate::error::Result;
use crate::logging::Diagnostics;
use crate::settings::{PagesSettings, ReferencePolicy, RenderSettings};
use crate::{hydration, ssr};

/// Output of a render pass over a bare descriptor.
#[derive(Debug)]
pub struct Rendered<T> {
	/// What the pass produced.
	pub output: T,
	/// Components created by custom descriptors that had no enclosing
	/// component, in traversal order.
	pub components: Vec<ComponentInstance>,
}

impl<T> Rendered<T> {
	/// Discards the components and returns the output.
	pub fn into_output(self) -> T {
		self.output
	}
}

/// Runs render passes with a fixed set of settings and diagnostics.
///
/// # Example
///
/// ```ignore
/// use composer_pages::render::Renderer;
/// use composer_pages::dom::Document;
///
/// let renderer = Renderer::default();
/// let html = renderer.render_component_to_string(&mut panel)?;
///
/// let document = Document::parse(&html)?;
/// renderer.bind_component(&mut panel, &document)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
	settings: RenderSettings,
	diagnostics: Diagnostics,
}

impl Renderer {
	/// Creates a renderer with default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a renderer from loaded settings.
	pub fn from_settings(settings: &PagesSettings) -> Self {
		Self {
			settings: settings.render.clone(),
			diagnostics: Diagnostics::from_settings(&settings.diagnostics),
		}
	}

	/// Replaces the diagnostics.
	pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
		self.diagnostics = diagnostics;
		self
	}

	/// Sets the duplicate reference policy.
	pub fn with_reference_policy(mut self, policy: ReferencePolicy) -> Self {
		self.settings.duplicate_references = policy;
		self
	}

	/// Render settings in use.
	pub fn settings(&self) -> &RenderSettings {
		&self.settings
	}

	/// Diagnostics in use.
	pub fn diagnostics(&self) -> &Diagnostics {
		&self.diagnostics
	}

	fn policy(&self) -> ReferencePolicy {
		self.settings.duplicate_references
	}

	/// Serializes a descriptor tree to HTML.
	pub fn render_to_string(&self, descriptor: &Descriptor) -> Result<Rendered<String>> {
		let mut components = Vec::new();
		let mut output = String::new();
		{
			let mut cx = TraversalContext::detached(&mut components, &self.diagnostics, self.policy());
			ssr::serialize(descriptor, &mut cx, &mut output)?;
		}
		Ok(Rendered { output, components })
	}

	/// Builds live nodes for a descriptor tree.
	pub fn construct_as_dom(
		&self,
		descriptor: &Descriptor,
		document: &Document,
	) -> Result<Rendered<DocumentFragment>> {
		let mut components = Vec::new();
		let output = {
			let mut cx = TraversalContext::detached(&mut components, &self.diagnostics, self.policy());
			dom::construct(descriptor, document, &mut cx)?
		};
		Ok(Rendered { output, components })
	}

	/// Binds a descriptor tree to markup already in `document`.
	pub fn bind_to_existing_dom(
		&self,
		descriptor: &Descriptor,
		document: &Document,
	) -> Result<Rendered<()>> {
		let mut components = Vec::new();
		{
			let mut cx = TraversalContext::detached(&mut components, &self.diagnostics, self.policy());
			hydration::bind(descriptor, document, &mut cx)?;
		}
		Ok(Rendered {
			output: (),
			components,
		})
	}

	/// Renders a component and serializes its view.
	pub fn render_component_to_string(&self, instance: &mut ComponentInstance) -> Result<String> {
		let mut output = String::new();
		ssr::serialize_component(instance, &self.diagnostics, self.policy(), &mut output)?;
		Ok(output)
	}

	/// Renders a component and builds its nodes.
	pub fn construct_component(
		&self,
		instance: &mut ComponentInstance,
		document: &Document,
	) -> Result<DocumentFragment> {
		dom::construct_component(instance, document, &self.diagnostics, self.policy())
	}

	/// Renders a component and binds it to markup already in `document`.
	pub fn bind_component(&self, instance: &mut ComponentInstance, document: &Document) -> Result<()> {
		hydration::bind_component(instance, document, &self.diagnostics, self.policy())
	}
}
