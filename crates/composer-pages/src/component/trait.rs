//! Component trait definition.

use std::any::Any;

use async_trait::async_trait;

use super::base::ComponentBase;
use super::props::Props;
use super::request::FetchRequest;
use crate::element::{Child, Descriptor};
use crate::error::Result;

/// Upcast to [`Any`], implemented for every `'static` type.
pub trait AsAny: Any {
	/// Returns `self` as `&dyn Any`.
	fn as_any(&self) -> &dyn Any;

	/// Returns `self` as `&mut dyn Any`.
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Trait for page components.
///
/// A component owns typed state and produces a [`Descriptor`] tree from
/// it. Identity, references and nested components live in the
/// [`ComponentBase`] handed to every method.
///
/// The router drives a component through
/// `fetch -> render pass -> bind_interactions -> show`, and later
/// `hide -> remove`. See [`crate::lifecycle`].
///
/// # Example
///
/// ```ignore
/// use composer_pages::component::{Component, ComponentBase, Props};
/// use composer_pages::element::{Child, Descriptor};
///
/// struct Panel {
///     text: String,
/// }
///
/// impl Component for Panel {
///     fn construct(props: &Props, _children: &[Child]) -> Self {
///         Self { text: props.get_str("text").unwrap_or_default().to_string() }
///     }
///
///     fn name() -> &'static str {
///         "Panel"
///     }
///
///     fn render(&self, _base: &ComponentBase) -> Descriptor {
///         Descriptor::element("div")
///             .child(Descriptor::element("span").prop("ref", "label").child(self.text.clone()))
///             .build()
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait Component: AsAny {
	/// Builds the component from its props and constructor children.
	///
	/// The `id` prop has already been validated when this is called.
	fn construct(props: &Props, children: &[Child]) -> Self
	where
		Self: Sized;

	/// Returns the component's name for diagnostics.
	fn name() -> &'static str
	where
		Self: Sized;

	/// Produces the view. Must not have side effects beyond reading state.
	fn render(&self, base: &ComponentBase) -> Descriptor;

	/// Loads data before rendering. Returned props replace the current ones.
	async fn fetch(
		&mut self,
		_base: &ComponentBase,
		_request: &FetchRequest,
	) -> Result<Option<Props>> {
		Ok(None)
	}

	/// Runs the enter transition.
	async fn show(&mut self, _base: &ComponentBase) -> Result<()> {
		Ok(())
	}

	/// Runs the leave transition.
	async fn hide(&mut self, _base: &ComponentBase) -> Result<()> {
		Ok(())
	}

	/// Tears the component down. The default detaches the root element.
	async fn remove(&mut self, base: &mut ComponentBase) -> Result<()> {
		base.detach_root();
		Ok(())
	}

	/// Attaches listener logic once elements are bound.
	fn bind_interactions(&mut self, _base: &ComponentBase) {}
}
