//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - text generation
//! - `ProjectRepository`, `SectionRepository`, `RefinementRepository` - content store
//! - `DocumentExporter` - DOCX/PPTX rendering
//! - `SessionValidator` - bearer token validation

mod ai_provider;
mod document_exporter;
mod project_repository;
mod refinement_repository;
mod section_repository;
mod session_validator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, RequestMetadata, TokenUsage,
};
pub use document_exporter::{DocumentExporter, ExportError, ExportFormat, ExportedDocument};
pub use project_repository::ProjectRepository;
pub use refinement_repository::RefinementRepository;
pub use section_repository::SectionRepository;
pub use session_validator::SessionValidator;
