//! Documents, either built in memory or parsed from server markup.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::node::{DocumentFragment, DomElement, DomNode, NodeShape};
use super::selector::{Selector, SelectorError};
use crate::error::{ComponentError, Result};

/// A live document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	root: DomNode,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates an empty `<html><head></head><body></body></html>` document.
	pub fn new() -> Self {
		let root = DomNode::new_document();
		let html = DomNode::new_element("html");
		html.append_child(&DomNode::new_element("head"));
		html.append_child(&DomNode::new_element("body"));
		root.append_child(&html);
		Self { root }
	}

	/// Parses HTML markup the way a browser would.
	///
	/// Missing `<html>`, `<head>` and `<body>` elements are synthesised, so
	/// a bare fragment produced by the string renderer lands in the body.
	/// Doctypes, comments and processing instructions are dropped.
	pub fn parse(html: &str) -> Result<Self> {
		tracing::debug!(bytes = html.len(), "Parsing server markup");

		let dom = parse_document(RcDom::default(), Default::default())
			.from_utf8()
			.read_from(&mut html.as_bytes())
			.map_err(|err| ComponentError::Markup(err.to_string()))?;

		let root = DomNode::new_document();
		convert_children(&dom.document, &root);
		Ok(Self { root })
	}

	/// The document node.
	pub fn root(&self) -> &DomNode {
		&self.root
	}

	/// The `<html>` element.
	pub fn document_element(&self) -> Option<DomElement> {
		self.root.children().into_iter().find_map(|n| n.as_element())
	}

	/// The `<head>` element.
	pub fn head(&self) -> Option<DomElement> {
		self.top_level("head")
	}

	/// The `<body>` element.
	pub fn body(&self) -> Option<DomElement> {
		self.top_level("body")
	}

	fn top_level(&self, tag: &str) -> Option<DomElement> {
		self.document_element()?
			.child_elements()
			.into_iter()
			.find(|el| el.tag_name().eq_ignore_ascii_case(tag))
	}

	/// Creates a detached element owned by this document.
	pub fn create_element(&self, tag: &str) -> DomElement {
		DomElement::from_node(DomNode::new_element(tag))
	}

	/// Creates a detached text node.
	pub fn create_text_node(&self, text: &str) -> DomNode {
		DomNode::new_text(text)
	}

	/// Creates an empty fragment.
	pub fn create_fragment(&self) -> DocumentFragment {
		DocumentFragment::new()
	}

	/// First element whose `id` attribute equals `id`.
	pub fn get_element_by_id(&self, id: &str) -> Option<DomElement> {
		self.query(&Selector::id(id))
	}

	/// First element matching `selector`.
	pub fn find_one(&self, selector: &str) -> std::result::Result<Option<DomElement>, SelectorError> {
		Ok(self.query(&Selector::parse(selector)?))
	}

	/// First element matching an already parsed selector.
	pub fn query(&self, selector: &Selector) -> Option<DomElement> {
		self.root
			.children()
			.into_iter()
			.filter_map(|n| n.as_element())
			.find_map(|el| el.find_within(selector, |_| false))
	}

	/// Serializes the whole document.
	pub fn to_html(&self) -> String {
		self.root.to_html()
	}

	/// Normalised structure of the document.
	pub fn shape(&self) -> NodeShape {
		self.root.shape()
	}
}

fn convert_children(handle: &Handle, parent: &DomNode) {
	for child in handle.children.borrow().iter() {
		match &child.data {
			RcNodeData::Element { name, attrs, .. } => {
				let element = DomNode::new_element(name.local.as_ref());
				if let Some(view) = element.as_element() {
					for attr in attrs.borrow().iter() {
						view.set_attribute(attr.name.local.as_ref(), &attr.value);
					}
				}
				parent.append_child(&element);
				convert_children(child, &element);
			}
			RcNodeData::Text { contents } => {
				parent.append_child(&DomNode::new_text(contents.borrow().to_string()));
			}
			RcNodeData::Document
			| RcNodeData::Doctype { .. }
			| RcNodeData::Comment { .. }
			| RcNodeData::ProcessingInstruction { .. } => {}
		}
	}
}
