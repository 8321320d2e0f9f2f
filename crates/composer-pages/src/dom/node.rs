//! Reference-counted DOM nodes.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::selector::{Selector, SelectorError};
use crate::element::util::{html_escape, is_void_element};

struct NodeInner {
	data: NodeData,
	parent: RefCell<Weak<NodeInner>>,
	children: RefCell<Vec<Rc<NodeInner>>>,
}

enum NodeData {
	Document,
	Element {
		tag: String,
		attributes: RefCell<Vec<(String, String)>>,
	},
	Text(RefCell<String>),
}

/// The kind of a [`DomNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
	/// The document node.
	Document,
	/// An element.
	Element,
	/// A text node.
	Text,
}

/// A handle to a node in a live document.
///
/// Cloning the handle does not clone the node; two handles compare equal
/// when they point at the same node.
#[derive(Clone)]
pub struct DomNode(Rc<NodeInner>);

impl DomNode {
	fn from_data(data: NodeData) -> Self {
		Self(Rc::new(NodeInner {
			data,
			parent: RefCell::new(Weak::new()),
			children: RefCell::new(Vec::new()),
		}))
	}

	pub(crate) fn new_document() -> Self {
		Self::from_data(NodeData::Document)
	}

	pub(crate) fn new_element(tag: impl Into<String>) -> Self {
		Self::from_data(NodeData::Element {
			tag: tag.into(),
			attributes: RefCell::new(Vec::new()),
		})
	}

	pub(crate) fn new_text(text: impl Into<String>) -> Self {
		Self::from_data(NodeData::Text(RefCell::new(text.into())))
	}

	/// Kind of this node.
	pub fn kind(&self) -> NodeKind {
		match self.0.data {
			NodeData::Document => NodeKind::Document,
			NodeData::Element { .. } => NodeKind::Element,
			NodeData::Text(_) => NodeKind::Text,
		}
	}

	/// Returns the element view of this node, if it is an element.
	pub fn as_element(&self) -> Option<DomElement> {
		match self.0.data {
			NodeData::Element { .. } => Some(DomElement(self.clone())),
			_ => None,
		}
	}

	/// Returns the text of a text node.
	pub fn as_text(&self) -> Option<String> {
		match &self.0.data {
			NodeData::Text(text) => Some(text.borrow().clone()),
			_ => None,
		}
	}

	/// Parent node, if attached.
	pub fn parent(&self) -> Option<DomNode> {
		self.0.parent.borrow().upgrade().map(DomNode)
	}

	/// Child nodes in document order.
	pub fn children(&self) -> Vec<DomNode> {
		self.0.children.borrow().iter().cloned().map(DomNode).collect()
	}

	/// Appends `child`, detaching it from its previous parent first.
	pub fn append_child(&self, child: &DomNode) {
		child.detach();
		*child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
		self.0.children.borrow_mut().push(child.0.clone());
	}

	/// Removes this node from its parent. Does nothing when detached.
	pub fn detach(&self) {
		let parent = self.0.parent.replace(Weak::new());
		if let Some(parent) = parent.upgrade() {
			parent
				.children
				.borrow_mut()
				.retain(|sibling| !Rc::ptr_eq(sibling, &self.0));
		}
	}

	/// Whether both handles point at the same node.
	pub fn ptr_eq(&self, other: &DomNode) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	/// Concatenated text of this node and its descendants.
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		self.collect_text(&mut out);
		out
	}

	fn collect_text(&self, out: &mut String) {
		match &self.0.data {
			NodeData::Text(text) => out.push_str(&text.borrow()),
			_ => {
				for child in self.children() {
					child.collect_text(out);
				}
			}
		}
	}

	/// Serializes this node as HTML.
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		match &self.0.data {
			NodeData::Document => {
				for child in self.children() {
					child.write_html(out);
				}
			}
			NodeData::Text(text) => out.push_str(&html_escape(&text.borrow())),
			NodeData::Element { tag, attributes } => {
				out.push('<');
				out.push_str(tag);
				for (name, value) in attributes.borrow().iter() {
					out.push(' ');
					out.push_str(name);
					out.push_str("=\"");
					out.push_str(&html_escape(value));
					out.push('"');
				}
				if is_void_element(tag) {
					out.push_str(" />");
					return;
				}
				out.push('>');
				for child in self.children() {
					child.write_html(out);
				}
				out.push_str("</");
				out.push_str(tag);
				out.push('>');
			}
		}
	}

	/// Normalised structure of this node; see [`NodeShape`].
	pub fn shape(&self) -> NodeShape {
		match &self.0.data {
			NodeData::Text(text) => NodeShape::Text(text.borrow().clone()),
			NodeData::Document => NodeShape::Document(shapes_of(&self.children())),
			NodeData::Element { tag, attributes } => NodeShape::Element {
				tag: tag.to_ascii_lowercase(),
				attributes: attributes.borrow().iter().cloned().collect(),
				children: shapes_of(&self.children()),
			},
		}
	}
}

impl PartialEq for DomNode {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl Eq for DomNode {}

impl fmt::Debug for DomNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.0.data {
			NodeData::Document => f.write_str("DomNode(#document)"),
			NodeData::Element { tag, .. } => write!(f, "DomNode(<{}>)", tag),
			NodeData::Text(text) => write!(f, "DomNode({:?})", text.borrow()),
		}
	}
}

/// Structure of a node with the accidents of construction removed.
///
/// Adjacent text nodes are merged, empty text nodes dropped and attributes
/// sorted by name. Two trees with equal shapes look the same to a binder
/// even when one was built node by node and the other parsed from markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeShape {
	/// A document and its top-level children.
	Document(Vec<NodeShape>),
	/// An element.
	Element {
		/// Lower-cased tag name.
		tag: String,
		/// Attributes sorted by name.
		attributes: BTreeMap<String, String>,
		/// Child shapes.
		children: Vec<NodeShape>,
	},
	/// Merged text.
	Text(String),
}

/// Shapes of a node list, merging adjacent text.
pub fn shapes_of(nodes: &[DomNode]) -> Vec<NodeShape> {
	let mut shapes: Vec<NodeShape> = Vec::with_capacity(nodes.len());
	for node in nodes {
		match node.shape() {
			NodeShape::Text(text) if text.is_empty() => {}
			NodeShape::Text(text) => match shapes.last_mut() {
				Some(NodeShape::Text(previous)) => previous.push_str(&text),
				_ => shapes.push(NodeShape::Text(text)),
			},
			other => shapes.push(other),
		}
	}
	shapes
}

/// An element in a live document.
///
/// This is the adapter the render engine talks to: it records roots and
/// references, looks nodes up by selector and detaches roots on removal.
#[derive(Clone, PartialEq, Eq)]
pub struct DomElement(DomNode);

impl DomElement {
	fn attributes_cell(&self) -> &RefCell<Vec<(String, String)>> {
		match &(self.0).0.data {
			NodeData::Element { attributes, .. } => attributes,
			_ => unreachable!("DomElement always wraps an element node"),
		}
	}

	pub(crate) fn from_node(node: DomNode) -> Self {
		debug_assert_eq!(node.kind(), NodeKind::Element);
		Self(node)
	}

	/// The underlying node.
	pub fn node(&self) -> &DomNode {
		&self.0
	}

	/// Tag name as created or parsed.
	pub fn tag_name(&self) -> &str {
		match &(self.0).0.data {
			NodeData::Element { tag, .. } => tag,
			_ => unreachable!("DomElement always wraps an element node"),
		}
	}

	/// Value of an attribute.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.attributes_cell()
			.borrow()
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.clone())
	}

	/// Whether the attribute is present.
	pub fn has_attribute(&self, name: &str) -> bool {
		self.attributes_cell().borrow().iter().any(|(n, _)| n == name)
	}

	/// Sets an attribute, keeping its position when it already exists.
	pub fn set_attribute(&self, name: &str, value: &str) {
		let mut attributes = self.attributes_cell().borrow_mut();
		match attributes.iter_mut().find(|(n, _)| n == name) {
			Some((_, existing)) => *existing = value.to_string(),
			None => attributes.push((name.to_string(), value.to_string())),
		}
	}

	/// Removes an attribute and returns its value.
	pub fn remove_attribute(&self, name: &str) -> Option<String> {
		let mut attributes = self.attributes_cell().borrow_mut();
		let index = attributes.iter().position(|(n, _)| n == name)?;
		Some(attributes.remove(index).1)
	}

	/// All attributes in insertion order.
	pub fn attributes(&self) -> Vec<(String, String)> {
		self.attributes_cell().borrow().clone()
	}

	/// Appends a node.
	pub fn append_child(&self, child: &DomNode) {
		self.0.append_child(child);
	}

	/// Appends a text node holding `text`.
	pub fn append_text(&self, text: &str) {
		self.0.append_child(&DomNode::new_text(text));
	}

	/// Child nodes.
	pub fn children(&self) -> Vec<DomNode> {
		self.0.children()
	}

	/// Child elements, skipping text.
	pub fn child_elements(&self) -> Vec<DomElement> {
		self.0
			.children()
			.into_iter()
			.filter_map(|child| child.as_element())
			.collect()
	}

	/// Parent element, if any.
	pub fn parent_element(&self) -> Option<DomElement> {
		self.0.parent().and_then(|parent| parent.as_element())
	}

	/// Concatenated descendant text.
	pub fn text_content(&self) -> String {
		self.0.text_content()
	}

	/// Detaches this element from its parent.
	pub fn remove(&self) {
		self.0.detach();
	}

	/// Whether this element is attached to a parent.
	pub fn is_attached(&self) -> bool {
		self.0.parent().is_some()
	}

	/// Whether this element matches `selector`.
	pub fn matches(&self, selector: &Selector) -> bool {
		selector.matches(self)
	}

	/// First descendant matching `selector` in document order.
	///
	/// Like `querySelector`, the element itself is not considered.
	pub fn find_one(&self, selector: &str) -> Result<Option<DomElement>, SelectorError> {
		let selector = Selector::parse(selector)?;
		Ok(self.query(&selector))
	}

	/// All descendants matching `selector` in document order.
	pub fn find_all(&self, selector: &str) -> Result<Vec<DomElement>, SelectorError> {
		let selector = Selector::parse(selector)?;
		let mut found = Vec::new();
		for child in self.child_elements() {
			child.collect_matches(&selector, &mut found);
		}
		Ok(found)
	}

	/// First descendant matching an already parsed selector.
	pub fn query(&self, selector: &Selector) -> Option<DomElement> {
		self.child_elements()
			.into_iter()
			.find_map(|child| child.find_within(selector, |_| false))
	}

	/// First element matching `selector`, starting with this element.
	///
	/// Descendants for which `prune` returns `true` are skipped together
	/// with their subtrees. The element itself is never pruned.
	pub fn find_within(
		&self,
		selector: &Selector,
		prune: impl Fn(&DomElement) -> bool,
	) -> Option<DomElement> {
		if selector.matches(self) {
			return Some(self.clone());
		}
		self.find_in_children(selector, &prune)
	}

	fn find_in_children(
		&self,
		selector: &Selector,
		prune: &dyn Fn(&DomElement) -> bool,
	) -> Option<DomElement> {
		for child in self.child_elements() {
			if prune(&child) {
				continue;
			}
			if selector.matches(&child) {
				return Some(child);
			}
			if let Some(found) = child.find_in_children(selector, prune) {
				return Some(found);
			}
		}
		None
	}

	/// Every element matching `selector` in document order, starting with
	/// this element and skipping pruned subtrees like [`find_within`].
	///
	/// [`find_within`]: DomElement::find_within
	pub fn find_all_within(
		&self,
		selector: &Selector,
		prune: impl Fn(&DomElement) -> bool,
	) -> Vec<DomElement> {
		let mut found = Vec::new();
		if selector.matches(self) {
			found.push(self.clone());
		}
		self.collect_in_children(selector, &prune, &mut found);
		found
	}

	fn collect_in_children(
		&self,
		selector: &Selector,
		prune: &dyn Fn(&DomElement) -> bool,
		found: &mut Vec<DomElement>,
	) {
		for child in self.child_elements() {
			if prune(&child) {
				continue;
			}
			if selector.matches(&child) {
				found.push(child.clone());
			}
			child.collect_in_children(selector, prune, found);
		}
	}

	fn collect_matches(&self, selector: &Selector, found: &mut Vec<DomElement>) {
		if selector.matches(self) {
			found.push(self.clone());
		}
		for child in self.child_elements() {
			child.collect_matches(selector, found);
		}
	}

	/// Serializes this element and its subtree.
	pub fn outer_html(&self) -> String {
		self.0.to_html()
	}

	/// Normalised structure of this element.
	pub fn shape(&self) -> NodeShape {
		self.0.shape()
	}
}

impl From<DomElement> for DomNode {
	fn from(element: DomElement) -> Self {
		element.0
	}
}

impl fmt::Debug for DomElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DomElement")
			.field("tag", &self.tag_name())
			.field("attributes", &self.attributes())
			.finish()
	}
}

/// An ordered list of detached top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFragment {
	nodes: Vec<DomNode>,
}

impl DocumentFragment {
	/// Creates an empty fragment.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a node at the end.
	pub fn push(&mut self, node: DomNode) {
		self.nodes.push(node);
	}

	/// Moves all nodes of `other` to the end of this fragment.
	pub fn extend(&mut self, other: DocumentFragment) {
		self.nodes.extend(other.nodes);
	}

	/// Top-level nodes.
	pub fn nodes(&self) -> &[DomNode] {
		&self.nodes
	}

	/// Number of top-level nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the fragment is empty.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// First top-level element.
	pub fn first_element(&self) -> Option<DomElement> {
		self.nodes.iter().find_map(DomNode::as_element)
	}

	/// Appends every node to `parent`, in order.
	pub fn append_to(&self, parent: &DomElement) {
		for node in &self.nodes {
			parent.append_child(node);
		}
	}

	/// Serializes the fragment.
	pub fn to_html(&self) -> String {
		self.nodes.iter().map(DomNode::to_html).collect()
	}

	/// Normalised structure of the fragment.
	pub fn shapes(&self) -> Vec<NodeShape> {
		shapes_of(&self.nodes)
	}
}
