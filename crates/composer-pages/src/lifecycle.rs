//! Lifecycle cascade helpers for a router.
//!
//! A router enters a page slot with [`enter`] and leaves it with
//! [`leave`]. Nested components found during the render pass receive the
//! same calls: `bind_interactions` and `show` parent first, `hide` and
//! `remove` children first.

use futures::future::{FutureExt, LocalBoxFuture};

use crate::component::{ComponentInstance, FetchRequest};
use crate::dom::{Document, DomElement};
use crate::error::Result;
use crate::render::Renderer;

/// Which render operation [`enter`] runs.
#[derive(Debug, Clone, Copy)]
pub enum RenderTarget<'d> {
	/// Serialize on the server. No interactions are bound and nothing is shown.
	Serialize,
	/// Build fresh nodes and append them to `parent`.
	Construct {
		/// Document owning the new nodes.
		document: &'d Document,
		/// Element the component is appended to.
		parent: &'d DomElement,
	},
	/// Bind to server markup already in `document`.
	Bind {
		/// Document holding the markup.
		document: &'d Document,
	},
}

/// What [`enter`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entered {
	/// Serialized markup.
	Markup(String),
	/// Nodes were constructed and appended.
	Mounted,
	/// Existing markup was bound.
	Bound,
}

/// Runs `fetch`, the render operation, then `bind_interactions` and `show`
/// over the component tree.
pub async fn enter(
	instance: &mut ComponentInstance,
	request: &FetchRequest,
	target: RenderTarget<'_>,
	renderer: &Renderer,
) -> Result<Entered> {
	tracing::debug!(component = instance.name(), path = %request.path, "enter");
	instance.fetch(request).await?;

	let entered = match target {
		RenderTarget::Serialize => {
			return Ok(Entered::Markup(renderer.render_component_to_string(instance)?));
		}
		RenderTarget::Construct { document, parent } => {
			renderer.construct_component(instance, document)?.append_to(parent);
			Entered::Mounted
		}
		RenderTarget::Bind { document } => {
			renderer.bind_component(instance, document)?;
			Entered::Bound
		}
	};

	bind_interactions_tree(instance);
	show_tree(instance).await?;
	Ok(entered)
}

/// Runs `hide` then `remove` over the component tree.
pub async fn leave(instance: &mut ComponentInstance) -> Result<()> {
	tracing::debug!(component = instance.name(), "leave");
	hide_tree(instance).await?;
	remove_tree(instance).await
}

/// Calls `bind_interactions` on `instance`, then on its nested components.
pub fn bind_interactions_tree(instance: &mut ComponentInstance) {
	instance.bind_interactions();
	for nested in instance.base_mut().custom_elements_mut() {
		bind_interactions_tree(nested);
	}
}

/// Calls `show` on `instance`, then on its nested components.
pub fn show_tree(instance: &mut ComponentInstance) -> LocalBoxFuture<'_, Result<()>> {
	async move {
		instance.show().await?;
		for nested in instance.base_mut().custom_elements_mut() {
			show_tree(nested).await?;
		}
		Ok(())
	}
	.boxed_local()
}

/// Calls `hide` on the nested components of `instance`, then on itself.
pub fn hide_tree(instance: &mut ComponentInstance) -> LocalBoxFuture<'_, Result<()>> {
	async move {
		for nested in instance.base_mut().custom_elements_mut() {
			hide_tree(nested).await?;
		}
		instance.hide().await
	}
	.boxed_local()
}

/// Calls `remove` on the nested components of `instance`, then on itself.
pub fn remove_tree(instance: &mut ComponentInstance) -> LocalBoxFuture<'_, Result<()>> {
	async move {
		for nested in instance.base_mut().custom_elements_mut() {
			remove_tree(nested).await?;
		}
		instance.remove().await
	}
	.boxed_local()
}
