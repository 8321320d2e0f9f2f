//! Element descriptors.
//!
//! [`create`] (or the [`Descriptor::element`] / [`Descriptor::component`]
//! builders) produces an immutable descriptor tree. A tree is consumed by
//! one of three render operations, all driven by the shared [`plan`]:
//!
//! - `render_to_string`: HTML text, see [`crate::ssr`]
//! - `construct_as_dom`: new live nodes, see [`crate::dom`]
//! - `bind_to_existing_dom`: references into server markup, see [`crate::hydration`]

mod descriptor;
pub mod plan;
pub mod util;

pub(crate) use descriptor::Flat;
pub use descriptor::{Child, ComponentFactory, Descriptor, DescriptorBuilder, ElementType, create};
pub use plan::{
	AttrValue, ElementPlan, REFERENCE_ATTRIBUTE, TraversalContext, finish_element, plan_element,
};
