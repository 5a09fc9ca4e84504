//! Project aggregate.
//!
//! A project owns its sections and refinements; deleting it removes both.

use crate::domain::foundation::{OwnedByUser, ProjectId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::outline::kind_field;
use super::{DocumentError, DocumentKind, Outline, Section};

/// Maximum length for project title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Project aggregate - one document being drafted for one user.
///
/// # Invariants
///
/// - `title` is 1-500 characters, non-empty
/// - the document kind is the outline variant, never stored separately
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    user_id: UserId,
    title: String,
    main_topic: String,
    outline: Outline,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Project {
    /// Create a new project.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is empty or too long
    /// - `ValidationFailed` if the outline has no titles
    pub fn new(
        id: ProjectId,
        user_id: UserId,
        title: String,
        main_topic: String,
        outline: Outline,
    ) -> Result<Self, DocumentError> {
        Self::validate_title(&title)?;
        Self::validate_outline(&outline)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            title,
            main_topic,
            outline,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a project from persistence (no validation).
    pub fn reconstitute(
        id: ProjectId,
        user_id: UserId,
        title: String,
        main_topic: String,
        outline: Outline,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            main_topic,
            outline,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn main_topic(&self) -> &str {
        &self.main_topic
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Returns the document kind, derived from the outline variant.
    pub fn document_kind(&self) -> DocumentKind {
        self.outline.kind()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the project.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the new title is empty or too long
    pub fn rename(&mut self, title: String) -> Result<(), DocumentError> {
        Self::validate_title(&title)?;
        self.title = title;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Replace the topic used for future generation.
    pub fn set_main_topic(&mut self, main_topic: String) {
        self.main_topic = main_topic;
        self.updated_at = Timestamp::now();
    }

    /// Replace the outline titles, keeping the document kind.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `titles` is empty
    pub fn replace_titles(&mut self, titles: Vec<String>) -> Result<(), DocumentError> {
        let outline = Outline::new(self.document_kind(), titles);
        Self::validate_outline(&outline)?;
        self.outline = outline;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Builds fresh sections for every outline title, ordered from zero.
    pub fn draft_sections(&self) -> Vec<Section> {
        let kind = self.document_kind().section_kind();
        self.outline
            .titles()
            .iter()
            .enumerate()
            .map(|(index, title)| Section::new(self.id, kind, title.clone(), index as u32))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_title(title: &str) -> Result<(), DocumentError> {
        if title.trim().is_empty() {
            return Err(DocumentError::validation("title", "Title cannot be empty"));
        }
        if title.len() > MAX_TITLE_LENGTH {
            return Err(DocumentError::validation(
                "title",
                format!("Title exceeds {} characters", MAX_TITLE_LENGTH),
            ));
        }
        Ok(())
    }

    fn validate_outline(outline: &Outline) -> Result<(), DocumentError> {
        if outline.is_empty() {
            return Err(DocumentError::validation(
                kind_field(outline.kind()),
                "At least one section/slide is required.",
            ));
        }
        Ok(())
    }
}

impl OwnedByUser for Project {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::SectionKind;

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn report() -> Project {
        Project::new(
            ProjectId::new(),
            owner(),
            "Quarterly Report".to_string(),
            "Q3 results".to_string(),
            Outline::LongForm(vec!["Intro".into(), "Results".into()]),
        )
        .unwrap()
    }

    #[test]
    fn new_project_derives_kind_from_outline() {
        let project = report();
        assert_eq!(project.document_kind(), DocumentKind::Docx);
        assert_eq!(project.created_at(), project.updated_at());
    }

    #[test]
    fn new_rejects_blank_title() {
        let result = Project::new(
            ProjectId::new(),
            owner(),
            "   ".to_string(),
            "topic".to_string(),
            Outline::SlideDeck(vec!["One".into()]),
        );
        assert!(matches!(
            result,
            Err(DocumentError::ValidationFailed { ref field, .. }) if field == "title"
        ));
    }

    #[test]
    fn new_rejects_overlong_title() {
        let result = Project::new(
            ProjectId::new(),
            owner(),
            "x".repeat(MAX_TITLE_LENGTH + 1),
            "topic".to_string(),
            Outline::SlideDeck(vec!["One".into()]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_rejects_empty_outline() {
        let result = Project::new(
            ProjectId::new(),
            owner(),
            "Deck".to_string(),
            "topic".to_string(),
            Outline::SlideDeck(Vec::new()),
        );
        assert!(matches!(
            result,
            Err(DocumentError::ValidationFailed { ref field, .. }) if field == "slides"
        ));
    }

    #[test]
    fn replace_titles_keeps_kind() {
        let mut project = report();
        project
            .replace_titles(vec!["Summary".into(), "Outlook".into(), "Risks".into()])
            .unwrap();

        assert_eq!(project.document_kind(), DocumentKind::Docx);
        assert_eq!(project.outline().titles().len(), 3);
    }

    #[test]
    fn replace_titles_rejects_empty_list() {
        let mut project = report();
        assert!(project.replace_titles(Vec::new()).is_err());
        assert_eq!(project.outline().titles().len(), 2);
    }

    #[test]
    fn draft_sections_are_contiguous_from_zero() {
        let project = report();
        let sections = project.draft_sections();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].order_index(), 0);
        assert_eq!(sections[0].title(), "Intro");
        assert_eq!(sections[1].order_index(), 1);
        assert!(sections
            .iter()
            .all(|s| s.kind() == SectionKind::Section && s.project_id() == project.id()));
        assert!(sections.iter().all(|s| !s.has_content()));
    }

    #[test]
    fn ownership_uses_user_id() {
        let project = report();
        assert!(project.is_owner(&owner()));
        assert!(!project.is_owner(&UserId::new("someone-else").unwrap()));
    }
}
