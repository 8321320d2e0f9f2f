//! Property-based tests for hydration equivalence
//!
//! For random descriptor trees, serializing, parsing and binding must
//! populate the same references at structurally equivalent positions as
//! constructing the tree directly.

use composer_pages::dom::{DomElement, NodeShape};
use composer_pages::element::{TraversalContext, finish_element, plan_element};
use composer_pages::logging::{DiagnosticLevel, Diagnostics};
use composer_pages::prelude::*;
use composer_pages::settings::ReferencePolicy;
use proptest::prelude::*;

/// Renders its constructor children inside a `<div>`.
struct Generated;

impl Component for Generated {
	fn construct(_props: &Props, _children: &[Child]) -> Self {
		Self
	}

	fn name() -> &'static str {
		"Generated"
	}

	fn render(&self, base: &ComponentBase) -> Descriptor {
		Descriptor::element("div")
			.children(base.children().to_vec())
			.build()
	}
}

#[derive(Debug, Clone)]
enum Node {
	Text(String),
	Element {
		tag: &'static str,
		reference: Option<&'static str>,
		class: Option<String>,
		hidden: bool,
		children: Vec<Node>,
	},
	Nested(Vec<Node>),
}

fn tag() -> impl Strategy<Value = &'static str> {
	prop::sample::select(vec!["div", "span", "section", "article"])
}

fn reference() -> impl Strategy<Value = Option<&'static str>> {
	proptest::option::of(prop::sample::select(vec!["a", "b", "c"]))
}

fn node() -> impl Strategy<Value = Node> {
	let leaf = prop_oneof![
		r#"[a-z <>&"']{0,6}"#.prop_map(Node::Text),
		(tag(), reference()).prop_map(|(tag, reference)| Node::Element {
			tag,
			reference,
			class: None,
			hidden: false,
			children: Vec::new(),
		}),
	];
	leaf.prop_recursive(4, 48, 4, |inner| {
		prop_oneof![
			3 => (
				tag(),
				reference(),
				proptest::option::of("[a-z]{1,5}"),
				any::<bool>(),
				prop::collection::vec(inner.clone(), 0..4),
			)
				.prop_map(|(tag, reference, class, hidden, children)| Node::Element {
					tag,
					reference,
					class,
					hidden,
					children,
				}),
			1 => prop::collection::vec(inner, 0..3).prop_map(Node::Nested),
		]
	})
}

fn to_child(node: &Node, next_id: &mut usize) -> Child {
	match node {
		Node::Text(text) => Child::from(text.clone()),
		Node::Element {
			tag,
			reference,
			class,
			hidden,
			children,
		} => {
			let mut builder = Descriptor::element(*tag);
			if let Some(reference) = reference {
				builder = builder.prop("ref", *reference);
			}
			if let Some(class) = class {
				builder = builder.prop("class", class.clone());
			}
			builder = builder.prop("hidden", *hidden).prop("tabIndex", 1);
			for child in children {
				builder = builder.child(to_child(child, next_id));
			}
			builder.build().into()
		}
		Node::Nested(children) => {
			*next_id += 1;
			let mut builder = Descriptor::component::<Generated>().prop("id", format!("n{}", next_id));
			for child in children {
				builder = builder.child(to_child(child, next_id));
			}
			builder.build().into()
		}
	}
}

fn instance(nodes: &[Node]) -> ComponentInstance {
	let mut next_id = 0;
	let children = nodes.iter().map(|node| to_child(node, &mut next_id)).collect();
	ComponentInstance::new::<Generated>(Props::with_id("root"), children).unwrap()
}

fn renderer() -> Renderer {
	Renderer::default().with_diagnostics(Diagnostics::silent(DiagnosticLevel::Errors))
}

fn sorted_keys(instance: &ComponentInstance) -> Vec<String> {
	let mut keys: Vec<String> = instance.elements().keys().cloned().collect();
	keys.sort();
	keys
}

fn shape(element: Option<&DomElement>) -> Option<NodeShape> {
	element.map(DomElement::shape)
}

/// Compares two instances of the same tree, recursively.
fn assert_equivalent(constructed: &ComponentInstance, bound: &ComponentInstance) -> Result<(), TestCaseError> {
	prop_assert_eq!(constructed.id(), bound.id());
	prop_assert_eq!(sorted_keys(constructed), sorted_keys(bound));
	for key in sorted_keys(constructed) {
		prop_assert_eq!(shape(constructed.element(&key)), shape(bound.element(&key)));
	}
	prop_assert_eq!(shape(constructed.root()), shape(bound.root()));
	prop_assert!(!constructed.base().has_rendered_first_element());
	prop_assert!(!bound.base().has_rendered_first_element());
	prop_assert_eq!(constructed.custom_elements().len(), bound.custom_elements().len());
	for (a, b) in constructed.custom_elements().iter().zip(bound.custom_elements()) {
		assert_equivalent(a, b)?;
	}
	Ok(())
}

fn component_ids(instance: &ComponentInstance, out: &mut Vec<String>) {
	out.push(instance.id().to_string());
	for nested in instance.custom_elements() {
		component_ids(nested, out);
	}
}

fn element_ids(shape: &NodeShape, out: &mut Vec<String>) {
	match shape {
		NodeShape::Element {
			attributes, children, ..
		} => {
			if let Some(id) = attributes.get("id") {
				out.push(id.clone());
			}
			for child in children {
				element_ids(child, out);
			}
		}
		NodeShape::Document(children) => {
			for child in children {
				element_ids(child, out);
			}
		}
		NodeShape::Text(_) => {}
	}
}

fn first_element_flag(cx: &TraversalContext<'_>) -> bool {
	cx.component().is_some_and(ComponentBase::has_rendered_first_element)
}

/// Walks intrinsic elements through the visit plan, checking the
/// first-element flag before and after every element and child visit.
fn walk_first_element_flag(nodes: &[Node], cx: &mut TraversalContext<'_>) -> Result<(), TestCaseError> {
	for node in nodes {
		let (tag, children) = match node {
			Node::Element { tag, children, .. } => (*tag, children),
			Node::Text(_) | Node::Nested(_) => continue,
		};
		let below_root = cx.is_child_of_root();
		prop_assert_eq!(first_element_flag(cx), below_root);

		let props = Props::new();
		let plan = plan_element(tag, &props, cx);
		prop_assert_eq!(plan.id.as_deref(), (!below_root).then_some("root"));
		prop_assert!(first_element_flag(cx));

		walk_first_element_flag(children, &mut cx.child())?;
		prop_assert!(first_element_flag(cx));

		finish_element(cx);
		prop_assert_eq!(first_element_flag(cx), below_root);
	}
	Ok(())
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	/// Property: serialize -> parse -> bind matches construct.
	#[test]
	fn prop_bind_matches_construct(nodes in prop::collection::vec(node(), 0..4)) {
		let renderer = renderer();

		let mut constructed = instance(&nodes);
		let document = Document::new();
		let body = document.body().unwrap();
		renderer.construct_component(&mut constructed, &document).unwrap().append_to(&body);

		let mut bound = instance(&nodes);
		let html = renderer.render_component_to_string(&mut bound).unwrap();
		let parsed = Document::parse(&html).unwrap();
		renderer.bind_component(&mut bound, &parsed).unwrap();

		prop_assert_eq!(body.shape(), parsed.body().unwrap().shape());
		assert_equivalent(&constructed, &bound)?;
	}

	/// Property: each component id appears on exactly one element.
	#[test]
	fn prop_one_id_per_component(nodes in prop::collection::vec(node(), 0..4)) {
		let renderer = renderer();
		let mut root = instance(&nodes);
		let html = renderer.render_component_to_string(&mut root).unwrap();
		let parsed = Document::parse(&html).unwrap();

		let mut components = Vec::new();
		component_ids(&root, &mut components);
		let mut elements = Vec::new();
		element_ids(&parsed.shape(), &mut elements);

		prop_assert_eq!(components, elements);
	}

	/// Property: the first-element flag is clear before each top-level
	/// element, set for its whole subtree, and reset once it finishes.
	#[test]
	fn prop_first_element_flag_per_visit(nodes in prop::collection::vec(node(), 0..6)) {
		let diagnostics = Diagnostics::silent(DiagnosticLevel::Errors);
		let mut base = ComponentBase::new("Generated", Props::with_id("root"), Vec::new()).unwrap();
		let mut cx = TraversalContext::for_component(&mut base, &diagnostics, ReferencePolicy::LastWins);

		walk_first_element_flag(&nodes, &mut cx)?;
		prop_assert!(!first_element_flag(&cx));
	}

	/// Property: rendering twice gives the same markup and registrations.
	#[test]
	fn prop_render_is_repeatable(nodes in prop::collection::vec(node(), 0..4)) {
		let renderer = renderer();
		let mut root = instance(&nodes);

		let first = renderer.render_component_to_string(&mut root).unwrap();
		let mut first_ids = Vec::new();
		component_ids(&root, &mut first_ids);

		let second = renderer.render_component_to_string(&mut root).unwrap();
		let mut second_ids = Vec::new();
		component_ids(&root, &mut second_ids);

		prop_assert_eq!(first, second);
		prop_assert_eq!(first_ids, second_ids);
	}
}
