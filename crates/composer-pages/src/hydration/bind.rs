//! Binding backend: attaches components to markup produced by the string
//! backend. No nodes are created.

use crate::component::{ComponentInstance, RenderMode};
use crate::dom::{Document, DomElement, Selector};
use crate::element::plan::plan_children;
use crate::element::{
	Descriptor, ElementType, Flat, REFERENCE_ATTRIBUTE, TraversalContext, finish_element,
	plan_element,
};
use crate::error::{ComponentError, Result};
use crate::logging::Diagnostics;
use crate::settings::ReferencePolicy;

/// Elements carrying an `id` are roots of nested components. A reference
/// lookup never descends into them.
fn is_nested_root(element: &DomElement) -> bool {
	element.has_attribute("id")
}

/// Locates the nodes of `descriptor` in `document`.
pub(crate) fn bind(
	descriptor: &Descriptor,
	document: &Document,
	cx: &mut TraversalContext<'_>,
) -> Result<()> {
	match descriptor.element_type() {
		ElementType::Intrinsic(tag) => {
			let plan = plan_element(tag, descriptor.props(), cx);

			if let Some(id) = &plan.id {
				let root = document
					.get_element_by_id(id)
					.ok_or_else(|| cx.diagnostics().error(ComponentError::RootNotFound { id: id.clone() }))?;
				if let Some(base) = cx.component_mut() {
					base.set_root(root);
				}
			}

			if let Some(reference) = plan.reference {
				bind_reference(reference, cx)?;
			}

			for child in plan_children(&plan, descriptor.children(), cx.diagnostics()) {
				if let Flat::Node(node) = child {
					bind(node, document, &mut cx.child())?;
				}
			}

			finish_element(cx);
		}
		ElementType::Custom(factory) => {
			let mut instance = factory
				.instantiate(descriptor.props(), descriptor.children())
				.map_err(|err| cx.diagnostics().error(err))?;
			bind_component(&mut instance, document, cx.diagnostics(), cx.policy())?;
			cx.adopt(instance);
		}
	}
	Ok(())
}

/// Finds the element for `reference` under the owner's root and registers it.
///
/// The n-th visit of a name in one pass binds the n-th matching element,
/// mirroring the order in which construction registers them.
fn bind_reference(reference: &str, cx: &mut TraversalContext<'_>) -> Result<()> {
	let diagnostics = cx.diagnostics();
	let Some(base) = cx.component_mut() else {
		return Ok(());
	};
	let Some(root) = base.root().cloned() else {
		return Err(diagnostics.error(ComponentError::ReferenceNotFound {
			reference: reference.to_string(),
		}));
	};

	let earlier = base.visit_reference(reference);
	let selector = Selector::attribute_equals(REFERENCE_ATTRIBUTE, reference);
	let element = root
		.find_all_within(&selector, is_nested_root)
		.into_iter()
		.nth(earlier)
		.ok_or_else(|| {
			diagnostics.error(ComponentError::ReferenceNotFound {
				reference: reference.to_string(),
			})
		})?;
	cx.register_reference(reference, element)
}

/// Renders `instance` and binds it to `document`.
pub(crate) fn bind_component(
	instance: &mut ComponentInstance,
	document: &Document,
	diagnostics: &Diagnostics,
	policy: ReferencePolicy,
) -> Result<()> {
	tracing::debug!(
		component = instance.name(),
		id = instance.id(),
		mode = RenderMode::Bind.as_str(),
		"render pass"
	);
	instance.base.begin_pass(RenderMode::Bind);
	let view = instance.render();
	{
		let mut cx = TraversalContext::for_component(&mut instance.base, diagnostics, policy);
		bind(&view, document, &mut cx)?;
	}
	instance.base.set_bound_dom(true);
	Ok(())
}
