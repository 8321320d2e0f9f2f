//! Construction backend: builds live nodes from a descriptor tree.

use super::document::Document;
use super::node::DocumentFragment;
use crate::component::{ComponentInstance, RenderMode};
use crate::element::plan::plan_children;
use crate::element::{Descriptor, ElementType, Flat, TraversalContext, finish_element, plan_element};
use crate::error::Result;
use crate::logging::Diagnostics;
use crate::settings::ReferencePolicy;

/// Creates the nodes of `descriptor` in `document`.
///
/// The first element of the owning component becomes its root and carries
/// its id. Elements with a `ref` are registered in the reference table.
pub(crate) fn construct(
	descriptor: &Descriptor,
	document: &Document,
	cx: &mut TraversalContext<'_>,
) -> Result<DocumentFragment> {
	let mut fragment = document.create_fragment();
	match descriptor.element_type() {
		ElementType::Intrinsic(tag) => {
			let plan = plan_element(tag, descriptor.props(), cx);
			let element = document.create_element(plan.tag);

			if let Some(id) = &plan.id {
				element.set_attribute("id", id);
				if let Some(base) = cx.component_mut() {
					base.set_root(element.clone());
				}
			}
			for (name, value) in &plan.attributes {
				element.set_attribute(name, value.dom_value());
			}
			if let Some(reference) = plan.reference {
				cx.register_reference(reference, element.clone())?;
			}

			for child in plan_children(&plan, descriptor.children(), cx.diagnostics()) {
				match child {
					Flat::Text(text) => element.append_text(text),
					Flat::Node(node) => {
						construct(node, document, &mut cx.child())?.append_to(&element);
					}
				}
			}

			fragment.push(element.into());
			finish_element(cx);
		}
		ElementType::Custom(factory) => {
			let mut instance = factory
				.instantiate(descriptor.props(), descriptor.children())
				.map_err(|err| cx.diagnostics().error(err))?;
			fragment.extend(construct_component(
				&mut instance,
				document,
				cx.diagnostics(),
				cx.policy(),
			)?);
			cx.adopt(instance);
		}
	}
	Ok(fragment)
}

/// Renders `instance` and constructs its nodes.
pub(crate) fn construct_component(
	instance: &mut ComponentInstance,
	document: &Document,
	diagnostics: &Diagnostics,
	policy: ReferencePolicy,
) -> Result<DocumentFragment> {
	tracing::debug!(
		component = instance.name(),
		id = instance.id(),
		mode = RenderMode::Construct.as_str(),
		"render pass"
	);
	instance.base.begin_pass(RenderMode::Construct);
	let view = instance.render();
	let mut cx = TraversalContext::for_component(&mut instance.base, diagnostics, policy);
	construct(&view, document, &mut cx)
}
