//! In-memory live DOM.
//!
//! A small reference-counted DOM used as the target of construction and
//! binding. [`Document::parse`] turns server markup into a document with
//! html5ever, so a string render can be bound exactly as a browser would
//! see it.
//!
//! ```ignore
//! use composer_pages::dom::Document;
//!
//! let document = Document::parse(r#"<div id="panel"><span data-ref="label">hello</span></div>"#)?;
//! let panel = document.get_element_by_id("panel").unwrap();
//! let label = panel.find_one(r#"[data-ref="label"]"#)?.unwrap();
//! assert_eq!(label.text_content(), "hello");
//! ```

mod document;
mod mount;
mod node;
mod selector;

pub use document::Document;
pub(crate) use mount::{construct, construct_component};
pub use node::{DocumentFragment, DomElement, DomNode, NodeKind, NodeShape, shapes_of};
pub use selector::{Selector, SelectorError};
