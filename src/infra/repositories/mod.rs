//! Repository layer - Data access abstraction
//!
//! A single generic repository maps typed entities onto the document store.

mod base;
pub(crate) mod entities;

pub use base::{to_document, Entity, Repository};
