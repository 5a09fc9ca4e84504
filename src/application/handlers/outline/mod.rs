//! Outline suggestion handler.

mod suggest_outline;

pub use suggest_outline::{SuggestOutlineHandler, SuggestOutlineQuery, SuggestOutlineResult};
