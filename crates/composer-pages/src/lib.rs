//! Composer Pages - components rendered three ways
//!
//! A component framework whose views can be serialized to HTML on the
//! server, constructed as live DOM on the client, or bound to markup the
//! server already sent (hydration). All three modes share one set of
//! identity rules, so a bind always finds what a serialization emitted.
//!
//! ## Architecture
//!
//! - [`element`]: descriptors, the `create` factory and the shared visit plan
//! - [`component`]: the `Component` trait, `ComponentBase` and `ComponentInstance`
//! - [`ssr`]: the string backend
//! - [`dom`]: in-memory DOM, markup parser and the construction backend
//! - [`hydration`]: the binding backend
//! - [`render`]: the `Renderer` entry point
//! - [`lifecycle`]: cascade helpers for a router
//! - [`logging`]: leveled diagnostics
//! - [`settings`]: TOML and environment configuration
//!
//! ## Identity rules
//!
//! - The first intrinsic element of a component's view is its root and
//!   carries the component's `id`. No other element of that view does.
//! - A `ref` prop becomes a `data-ref` attribute and, in construct and
//!   bind mode, an entry in the component's reference table.
//! - Nested components are registered with their parent exactly once per
//!   render pass.
//!
//! ## Example
//!
//! ```ignore
//! use composer_pages::prelude::*;
//!
//! struct Panel;
//!
//! impl Component for Panel {
//!     fn construct(_props: &Props, _children: &[Child]) -> Self {
//!         Self
//!     }
//!
//!     fn name() -> &'static str {
//!         "Panel"
//!     }
//!
//!     fn render(&self, _base: &ComponentBase) -> Descriptor {
//!         Descriptor::element("div")
//!             .child(Descriptor::element("span").prop("ref", "label").child("hello"))
//!             .build()
//!     }
//! }
//!
//! let mut panel = ComponentInstance::new::<Panel>(Props::with_id("panel"), Vec::new())?;
//! let html = panel.render_to_string()?;
//! assert_eq!(html, r#"<div id="panel"><span data-ref="label">hello</span></div>"#);
//!
//! let document = Document::parse(&html)?;
//! panel.bind_to_existing_dom(&document)?;
//! assert_eq!(panel.element("label").unwrap().text_content(), "hello");
//! ```

#![warn(missing_docs)]

// Core modules
pub mod element;
pub mod error;
pub mod logging;
pub mod settings;

// Component system
pub mod component;

// Render backends
pub mod dom;
pub mod hydration;
pub mod ssr;

// Entry points
pub mod lifecycle;
pub mod render;

// Unified prelude for simplified imports
pub mod prelude;

// Re-export commonly used types
pub use component::{
	Component, ComponentBase, ComponentInstance, FetchRequest, PropValue, Props, RenderMode,
};
pub use dom::{Document, DocumentFragment, DomElement, DomNode, NodeShape};
pub use element::{Child, ComponentFactory, Descriptor, DescriptorBuilder, ElementType, create};
pub use error::{ComponentError, Result};
pub use lifecycle::{Entered, RenderTarget, enter, leave};
pub use logging::{DiagnosticLevel, Diagnostics};
pub use render::{Rendered, Renderer};
pub use settings::{PagesSettings, ReferencePolicy};

// Re-exported so components can implement the async hooks.
pub use async_trait::async_trait;
