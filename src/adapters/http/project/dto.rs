//! HTTP DTOs for project endpoints.
//!
//! Projects are exposed in their wire shape: a `document_type` plus two
//! optional title lists, exactly one of which is populated.

use serde::{Deserialize, Serialize};

use crate::domain::document::{Project, Section};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    /// "docx" or "pptx"
    pub document_type: String,
    pub main_topic: String,
    #[serde(default)]
    pub outline: Option<Vec<String>>,
    #[serde(default)]
    pub slides: Option<Vec<String>>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub main_topic: Option<String>,
    #[serde(default)]
    pub outline: Option<Vec<String>>,
    #[serde(default)]
    pub slides: Option<Vec<String>>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub document_type: String,
    pub main_topic: String,
    pub outline: Option<Vec<String>>,
    pub slides: Option<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        let outline = project.outline();
        Self {
            id: project.id().to_string(),
            user_id: project.user_id().to_string(),
            title: project.title().to_string(),
            document_type: project.document_kind().as_str().to_string(),
            main_topic: project.main_topic().to_string(),
            outline: outline.long_form_titles().map(<[String]>::to_vec),
            slides: outline.slide_titles().map(<[String]>::to_vec),
            created_at: project.created_at().to_rfc3339(),
            updated_at: project.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResponse {
    pub id: String,
    pub project_id: String,
    /// "section" or "slide"
    pub section_type: String,
    pub title: String,
    pub content: Option<String>,
    pub order_index: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Section> for SectionResponse {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id().to_string(),
            project_id: section.project_id().to_string(),
            section_type: section.kind().as_str().to_string(),
            title: section.title().to_string(),
            content: section.content().map(str::to_string),
            order_index: section.order_index(),
            created_at: section.created_at().to_rfc3339(),
            updated_at: section.updated_at().to_rfc3339(),
        }
    }
}

pub fn section_list(sections: &[Section]) -> Vec<SectionResponse> {
    sections.iter().map(SectionResponse::from).collect()
}
