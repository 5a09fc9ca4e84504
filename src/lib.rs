//! DocForge - AI-assisted document and slide deck generation
//!
//! Users create projects (long-form reports or slide decks) about a topic,
//! have section content drafted by a language model, refine sections with
//! natural-language requests, and download the result as `.docx` / `.pptx`.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
