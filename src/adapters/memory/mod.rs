//! In-memory content store.
//!
//! Useful for development, demos and tests. Does not persist data across
//! restarts.

mod content_store;

pub use content_store::InMemoryContentStore;
