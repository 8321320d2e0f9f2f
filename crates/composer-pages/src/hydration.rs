//! Hydration: binding components to server-rendered markup.
//!
//! The markup must be exactly what [`crate::ssr`] produced for the same
//! descriptor tree. Roots are found by id, references by `data-ref`
//! inside their component root (the root itself included, nested
//! component roots excluded). A missing root or reference is fatal.

mod bind;

pub(crate) use bind::{bind, bind_component};
