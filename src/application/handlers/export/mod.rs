//! Document export handler.

mod export_document;

pub use export_document::{ExportDocumentHandler, ExportDocumentQuery};
