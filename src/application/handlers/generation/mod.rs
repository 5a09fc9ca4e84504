//! Section generation handlers.

mod fill_empty_content;
mod generate_content;
mod materialize_sections;

pub use fill_empty_content::{FillEmptyContentCommand, FillEmptyContentHandler};
pub use generate_content::{GenerateContentCommand, GenerateContentHandler};
pub use materialize_sections::{MaterializeSectionsCommand, MaterializeSectionsHandler};
