//! Section entity - one heading (or slide) of a project.

use crate::domain::foundation::{ProjectId, SectionId, Timestamp};
use serde::{Deserialize, Serialize};

use super::SectionKind;

/// One ordered unit of a project's document.
///
/// `order_index` is zero-based and contiguous within a project. The
/// materialization and resync routines are the only writers of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,
    project_id: ProjectId,
    kind: SectionKind,
    title: String,
    content: Option<String>,
    order_index: u32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Section {
    /// Creates a section with no content yet.
    pub fn new(project_id: ProjectId, kind: SectionKind, title: String, order_index: u32) -> Self {
        let now = Timestamp::now();
        Self {
            id: SectionId::new(),
            project_id,
            kind,
            title,
            content: None,
            order_index,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a section from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SectionId,
        project_id: ProjectId,
        kind: SectionKind,
        title: String,
        content: Option<String>,
        order_index: u32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            project_id,
            kind,
            title,
            content,
            order_index,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn order_index(&self) -> u32 {
        self.order_index
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// True when content is present and not the empty string.
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Replaces the current content.
    pub fn set_content(&mut self, content: String) {
        self.content = Some(content);
        self.updated_at = Timestamp::now();
    }
}

/// Sorts sections by ascending `order_index`.
pub fn sort_by_order(sections: &mut [Section]) {
    sections.sort_by_key(|s| s.order_index);
}

/// Splits long-form content into paragraph blocks.
///
/// Blocks are separated by a blank line; each is trimmed and empty blocks
/// are dropped.
pub fn content_blocks(content: &str) -> Vec<&str> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(order_index: u32) -> Section {
        Section::new(
            ProjectId::new(),
            SectionKind::Section,
            format!("Section {}", order_index),
            order_index,
        )
    }

    #[test]
    fn new_section_has_no_content() {
        let s = section(0);
        assert_eq!(s.content(), None);
        assert!(!s.has_content());
    }

    #[test]
    fn empty_string_counts_as_no_content() {
        let mut s = section(0);
        s.set_content(String::new());
        assert!(!s.has_content());

        s.set_content("Body".to_string());
        assert!(s.has_content());
        assert_eq!(s.content(), Some("Body"));
    }

    #[test]
    fn sort_by_order_orders_ascending() {
        let mut sections = vec![section(2), section(0), section(1)];
        sort_by_order(&mut sections);
        let order: Vec<u32> = sections.iter().map(|s| s.order_index()).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn content_blocks_split_on_blank_lines() {
        let blocks = content_blocks("  First paragraph.\n\nSecond\nline.\n\n\n\n  ");
        assert_eq!(blocks, vec!["First paragraph.", "Second\nline."]);
    }

    #[test]
    fn content_blocks_of_empty_text_is_empty() {
        assert!(content_blocks("").is_empty());
    }
}
