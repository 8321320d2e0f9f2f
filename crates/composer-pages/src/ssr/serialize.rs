//! String backend.

use crate::component::{ComponentInstance, RenderMode};
use crate::element::plan::plan_children;
use crate::element::util::html_escape;
use crate::element::{AttrValue, Descriptor, ElementType, Flat, TraversalContext, finish_element, plan_element};
use crate::error::Result;
use crate::logging::Diagnostics;
use crate::settings::ReferencePolicy;

/// Appends the markup of `descriptor` to `out`.
pub(crate) fn serialize(
	descriptor: &Descriptor,
	cx: &mut TraversalContext<'_>,
	out: &mut String,
) -> Result<()> {
	match descriptor.element_type() {
		ElementType::Intrinsic(tag) => {
			let plan = plan_element(tag, descriptor.props(), cx);

			out.push('<');
			out.push_str(plan.tag);
			if let Some(id) = &plan.id {
				out.push_str(" id=\"");
				out.push_str(&html_escape(id));
				out.push('"');
			}
			for (name, value) in &plan.attributes {
				out.push(' ');
				out.push_str(name);
				if let AttrValue::Text(value) = value {
					out.push_str("=\"");
					out.push_str(&html_escape(value));
					out.push('"');
				}
			}

			if plan.is_void {
				out.push_str(" />");
				plan_children(&plan, descriptor.children(), cx.diagnostics());
			} else {
				out.push('>');
				for child in plan_children(&plan, descriptor.children(), cx.diagnostics()) {
					match child {
						Flat::Text(text) => out.push_str(&html_escape(text)),
						Flat::Node(node) => serialize(node, &mut cx.child(), out)?,
					}
				}
				out.push_str("</");
				out.push_str(plan.tag);
				out.push('>');
			}

			finish_element(cx);
		}
		ElementType::Custom(factory) => {
			let mut instance = factory
				.instantiate(descriptor.props(), descriptor.children())
				.map_err(|err| cx.diagnostics().error(err))?;
			serialize_component(&mut instance, cx.diagnostics(), cx.policy(), out)?;
			cx.adopt(instance);
		}
	}
	Ok(())
}

/// Renders `instance` and appends its markup to `out`.
pub(crate) fn serialize_component(
	instance: &mut ComponentInstance,
	diagnostics: &Diagnostics,
	policy: ReferencePolicy,
	out: &mut String,
) -> Result<()> {
	tracing::debug!(
		component = instance.name(),
		id = instance.id(),
		mode = RenderMode::Serialize.as_str(),
		"render pass"
	);
	instance.base.begin_pass(RenderMode::Serialize);
	let view = instance.render();
	let mut cx = TraversalContext::for_component(&mut instance.base, diagnostics, policy);
	serialize(&view, &mut cx, out)
}
