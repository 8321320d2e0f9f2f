//! Element descriptors and the `create` factory.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use crate::component::{Component, ComponentInstance, PropValue, Props};
use crate::dom::{Document, DocumentFragment};
use crate::error::Result;
use crate::render::{Rendered, Renderer};

/// Constructor of a component type, captured by a custom descriptor.
#[derive(Clone, Copy)]
pub struct ComponentFactory {
	name: &'static str,
	instantiate: fn(&Props, &[Child]) -> Result<ComponentInstance>,
}

fn instantiate<C: Component>(props: &Props, children: &[Child]) -> Result<ComponentInstance> {
	ComponentInstance::new::<C>(props.clone(), children.to_vec())
}

impl ComponentFactory {
	/// Factory for the component type `C`.
	pub fn of<C: Component>() -> Self {
		Self {
			name: C::name(),
			instantiate: instantiate::<C>,
		}
	}

	/// Name of the component type.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Builds a fresh instance.
	pub fn instantiate(&self, props: &Props, children: &[Child]) -> Result<ComponentInstance> {
		(self.instantiate)(props, children)
	}
}

impl fmt::Debug for ComponentFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ComponentFactory").field(&self.name).finish()
	}
}

/// What a descriptor stands for.
#[derive(Debug, Clone)]
pub enum ElementType {
	/// A plain tag.
	Intrinsic(Cow<'static, str>),
	/// A nested component.
	Custom(ComponentFactory),
}

impl From<&'static str> for ElementType {
	fn from(tag: &'static str) -> Self {
		Self::Intrinsic(Cow::Borrowed(tag))
	}
}

impl From<String> for ElementType {
	fn from(tag: String) -> Self {
		Self::Intrinsic(Cow::Owned(tag))
	}
}

impl From<ComponentFactory> for ElementType {
	fn from(factory: ComponentFactory) -> Self {
		Self::Custom(factory)
	}
}

/// A child of a descriptor.
#[derive(Debug, Clone)]
pub enum Child {
	/// Literal text.
	Text(Cow<'static, str>),
	/// A single descriptor.
	Node(Descriptor),
	/// A sequence of descriptors, flattened one level during traversal.
	Nodes(Vec<Descriptor>),
}

impl From<&'static str> for Child {
	fn from(text: &'static str) -> Self {
		Self::Text(Cow::Borrowed(text))
	}
}

impl From<String> for Child {
	fn from(text: String) -> Self {
		Self::Text(Cow::Owned(text))
	}
}

impl From<Descriptor> for Child {
	fn from(descriptor: Descriptor) -> Self {
		Self::Node(descriptor)
	}
}

impl From<DescriptorBuilder> for Child {
	fn from(builder: DescriptorBuilder) -> Self {
		Self::Node(builder.build())
	}
}

impl From<Vec<Descriptor>> for Child {
	fn from(descriptors: Vec<Descriptor>) -> Self {
		Self::Nodes(descriptors)
	}
}

/// A child after one level of flattening.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Flat<'a> {
	Text(&'a str),
	Node(&'a Descriptor),
}

pub(crate) fn flatten(children: &[Child]) -> Vec<Flat<'_>> {
	let mut flat = Vec::with_capacity(children.len());
	for child in children {
		match child {
			Child::Text(text) => flat.push(Flat::Text(text.as_ref())),
			Child::Node(node) => flat.push(Flat::Node(node)),
			Child::Nodes(nodes) => flat.extend(nodes.iter().map(Flat::Node)),
		}
	}
	flat
}

struct DescriptorInner {
	element: ElementType,
	props: Props,
	children: Vec<Child>,
}

/// An immutable description of one UI node and its children.
///
/// Descriptors carry no traversal state, so one tree can be rendered any
/// number of times in any of the three modes. Cloning is cheap.
#[derive(Clone)]
pub struct Descriptor(Rc<DescriptorInner>);

/// Creates a descriptor for a tag or a component.
///
/// ```ignore
/// let view = create("div", Props::new(), vec![
///     create("span", Props::new().with("ref", "label"), vec!["hello".into()]).into(),
/// ]);
/// ```
pub fn create(element: impl Into<ElementType>, props: Props, children: Vec<Child>) -> Descriptor {
	Descriptor(Rc::new(DescriptorInner {
		element: element.into(),
		props,
		children,
	}))
}

impl Descriptor {
	/// Starts building an intrinsic descriptor.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> DescriptorBuilder {
		DescriptorBuilder::new(ElementType::Intrinsic(tag.into()))
	}

	/// Starts building a descriptor for the component type `C`.
	pub fn component<C: Component>() -> DescriptorBuilder {
		DescriptorBuilder::new(ElementType::Custom(ComponentFactory::of::<C>()))
	}

	/// What this descriptor stands for.
	pub fn element_type(&self) -> &ElementType {
		&self.0.element
	}

	/// Tag name of an intrinsic descriptor.
	pub fn tag(&self) -> Option<&str> {
		match &self.0.element {
			ElementType::Intrinsic(tag) => Some(tag.as_ref()),
			ElementType::Custom(_) => None,
		}
	}

	/// Props.
	pub fn props(&self) -> &Props {
		&self.0.props
	}

	/// Children as declared.
	pub fn children(&self) -> &[Child] {
		&self.0.children
	}

	/// `true` for tag-backed descriptors, `false` for component-backed ones.
	pub fn is_intrinsic(&self) -> bool {
		matches!(self.0.element, ElementType::Intrinsic(_))
	}

	/// Serializes with the default renderer.
	pub fn render_to_string(&self) -> Result<Rendered<String>> {
		Renderer::default().render_to_string(self)
	}

	/// Constructs live nodes with the default renderer.
	pub fn construct_as_dom(&self, document: &Document) -> Result<Rendered<DocumentFragment>> {
		Renderer::default().construct_as_dom(self, document)
	}

	/// Binds to existing markup with the default renderer.
	pub fn bind_to_existing_dom(&self, document: &Document) -> Result<Rendered<()>> {
		Renderer::default().bind_to_existing_dom(self, document)
	}
}

impl fmt::Debug for Descriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Descriptor")
			.field("element", &self.0.element)
			.field("props", &self.0.props)
			.field("children", &self.0.children)
			.finish()
	}
}

/// Builder for [`Descriptor`].
#[derive(Debug)]
pub struct DescriptorBuilder {
	element: ElementType,
	props: Props,
	children: Vec<Child>,
}

impl DescriptorBuilder {
	fn new(element: ElementType) -> Self {
		Self {
			element,
			props: Props::new(),
			children: Vec::new(),
		}
	}

	/// Sets a prop.
	pub fn prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
		self.props.insert(name, value);
		self
	}

	/// Merges `props`, later values winning.
	pub fn props(mut self, props: Props) -> Self {
		for (name, value) in props.iter() {
			self.props.insert(name, value.clone());
		}
		self
	}

	/// Appends a child.
	pub fn child(mut self, child: impl Into<Child>) -> Self {
		self.children.push(child.into());
		self
	}

	/// Appends several children.
	pub fn children<I>(mut self, children: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Child>,
	{
		self.children.extend(children.into_iter().map(Into::into));
		self
	}

	/// Finishes the descriptor.
	pub fn build(self) -> Descriptor {
		create(self.element, self.props, self.children)
	}
}
