//! Domain layer - document projects and the shared foundation types.

pub mod document;
pub mod foundation;
