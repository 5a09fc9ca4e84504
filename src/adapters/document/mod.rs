//! Document adapters - Office Open XML exporters.
//!
//! - `DocxExporter` - long-form projects to WordprocessingML
//! - `PptxExporter` - slide decks to PresentationML
//!
//! Both build their packages in memory through the shared `ooxml` module.

mod docx_writer;
mod ooxml;
mod pptx_writer;

pub use docx_writer::DocxExporter;
pub use ooxml::xml_escape;
pub use pptx_writer::PptxExporter;
