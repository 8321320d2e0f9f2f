//! Component system.
//!
//! A component is a user type implementing [`Component`], wrapped in a
//! [`ComponentInstance`] together with its [`ComponentBase`]: the id, the
//! root element, the reference table and the nested components found
//! while traversing its view.
//!
//! ## Usage
//!
//! ```ignore
//! use composer_pages::component::{ComponentInstance, Props};
//!
//! let mut panel = ComponentInstance::new::<Panel>(Props::with_id("panel"), Vec::new())?;
//! let html = panel.render_to_string()?;
//! assert_eq!(html, r#"<div id="panel"><span data-ref="label">hello</span></div>"#);
//! ```

mod base;
mod instance;
mod props;
mod request;
mod r#trait;

pub use base::{ComponentBase, RenderMode};
pub use instance::ComponentInstance;
pub use props::{PropValue, Props};
pub use request::FetchRequest;
pub use r#trait::{AsAny, Component};
