//! # Composer
//!
//! Declarative page components that render three ways from one description:
//! to an HTML string on the server, to a live DOM tree, or by binding to
//! markup a server already produced.
//!
//! ## Feature Flags
//!
//! - `pages` (default) - The element descriptor engine, components and renderers
//!
//! ## Example
//!
//! ```rust
//! use composer::prelude::*;
//!
//! let card = Descriptor::element("section")
//! 	.prop("class", "card")
//! 	.child(Descriptor::element("h2").child("Title"))
//! 	.build();
//!
//! let html = card.render_to_string().unwrap().into_output();
//! assert_eq!(html, "<section class=\"card\"><h2>Title</h2></section>");
//! ```

#[cfg(feature = "pages")]
pub use composer_pages::*;
