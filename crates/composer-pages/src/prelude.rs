//! Commonly used items.
//!
//! ```ignore
//! use composer_pages::prelude::*;
//! ```

pub use crate::async_trait;
pub use crate::component::{Component, ComponentBase, ComponentInstance, FetchRequest, Props};
pub use crate::dom::{Document, DocumentFragment, DomElement};
pub use crate::element::{Child, Descriptor, create};
pub use crate::error::{ComponentError, Result};
pub use crate::lifecycle::{RenderTarget, enter, leave};
pub use crate::render::Renderer;
