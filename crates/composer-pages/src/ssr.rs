//! Server-side rendering.
//!
//! Produces HTML text from a descriptor tree. Ids and `data-ref`
//! attributes follow the same plan as DOM construction, so the markup can
//! later be bound by [`crate::hydration`]. No references are registered,
//! since no live nodes exist yet.

mod serialize;

pub(crate) use serialize::{serialize, serialize_component};
