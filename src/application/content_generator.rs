//! ContentGenerator - prompt construction on top of the text-generation port.
//!
//! Three call sites talk to the model: outline suggestion, section drafting
//! and refinement. Each builds its own system instruction, user prompt and
//! temperature and issues a single completion request.

use std::sync::Arc;

use crate::domain::document::{DocumentError, DocumentKind};
use crate::domain::foundation::{ProjectId, UserId};
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata};

const OUTLINE_SYSTEM_PROMPT: &str = "You are an expert business analyst and presentation creator.";

const PLAIN_TEXT_RULES: &str = "IMPORTANT: Do NOT use markdown formatting. \
Do NOT use hashtags (#) for headings. Write in plain text with proper paragraph structure. \
Use numbered lists (1. 2. 3.) or simple dashes (-) for bullet points when needed.";

const OUTLINE_TEMPERATURE: f32 = 0.4;
const DRAFT_TEMPERATURE: f32 = 0.6;
const REFINE_TEMPERATURE: f32 = 0.5;

/// Inputs for drafting or refining a single section.
#[derive(Debug, Clone, Copy)]
pub struct SectionPrompt<'a> {
    pub kind: DocumentKind,
    pub main_topic: &'a str,
    pub title: &'a str,
}

/// Generates outlines and section text through an [`AIProvider`].
#[derive(Clone)]
pub struct ContentGenerator {
    provider: Arc<dyn AIProvider>,
}

impl ContentGenerator {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    /// Suggests ordered titles for a new document about `topic`.
    ///
    /// # Errors
    ///
    /// - `UpstreamGeneration` if the provider fails or the reply has no titles
    pub async fn suggest_outline(
        &self,
        kind: DocumentKind,
        topic: &str,
        requester: &UserId,
    ) -> Result<Vec<String>, DocumentError> {
        let noun = match kind {
            DocumentKind::Docx => "sections",
            DocumentKind::Pptx => "slide titles",
        };
        let prompt = format!(
            "You are assisting with creating a structured business document about: {topic}.\n\
             Propose 6-8 concise {noun} in order. \
             Each line should be a single heading without numbering."
        );

        let request = CompletionRequest::new(RequestMetadata::new(
            requester.clone(),
            "suggest_outline",
        ))
        .with_system_prompt(OUTLINE_SYSTEM_PROMPT)
        .with_message(MessageRole::User, prompt)
        .with_temperature(OUTLINE_TEMPERATURE);

        let response = self.provider.complete(request).await?;
        let titles = parse_outline(&response.content);
        if titles.is_empty() {
            return Err(DocumentError::UpstreamGeneration(
                "completion contained no titles".to_string(),
            ));
        }
        Ok(titles)
    }

    /// Drafts the body of one section from its title alone.
    pub async fn draft_section(
        &self,
        section: SectionPrompt<'_>,
        requester: &UserId,
        project_id: ProjectId,
    ) -> Result<String, DocumentError> {
        let style = match section.kind {
            DocumentKind::Docx => "a detailed narrative section suitable for a Word document",
            DocumentKind::Pptx => "concise bullet points suitable for a PowerPoint slide",
        };
        let prompt = format!(
            "Main topic: {}\nSection title: {}\nCreate {} that flows professionally \
             and keeps business readers in mind.",
            section.main_topic, section.title, style
        );

        let request = CompletionRequest::new(
            RequestMetadata::new(requester.clone(), "draft_section").with_project(project_id),
        )
        .with_system_prompt(format!(
            "You are an analyst that drafts structured business reports and presentation slides. {}",
            PLAIN_TEXT_RULES
        ))
        .with_message(MessageRole::User, prompt)
        .with_temperature(DRAFT_TEMPERATURE);

        let response = self.provider.complete(request).await?;
        non_empty(&response.content)
    }

    /// Rewrites `current` according to the user's `instruction`.
    pub async fn refine_content(
        &self,
        section: SectionPrompt<'_>,
        current: &str,
        instruction: &str,
        requester: &UserId,
        project_id: ProjectId,
    ) -> Result<String, DocumentError> {
        let label = match section.kind {
            DocumentKind::Docx => "Word document section",
            DocumentKind::Pptx => "PowerPoint slide",
        };
        let prompt = format!(
            "Main topic: {}\n{}: {}\nCurrent content:\n{}\n\n\
             User refinement request: {}\n\
             Return only the updated content in plain text without markdown.",
            section.main_topic, label, section.title, current, instruction
        );

        let request = CompletionRequest::new(
            RequestMetadata::new(requester.clone(), "refine_section").with_project(project_id),
        )
        .with_system_prompt(format!(
            "You enhance business documents while preserving factual accuracy and structure. {}",
            PLAIN_TEXT_RULES
        ))
        .with_message(MessageRole::User, prompt)
        .with_temperature(REFINE_TEMPERATURE);

        let response = self.provider.complete(request).await?;
        non_empty(&response.content)
    }
}

/// Trimmed completion text; blank replies count as upstream failures.
fn non_empty(content: &str) -> Result<String, DocumentError> {
    let text = content.trim();
    if text.is_empty() {
        return Err(DocumentError::UpstreamGeneration("empty completion".to_string()));
    }
    Ok(text.to_string())
}

/// Turns a raw model reply into one title per non-empty line.
///
/// Bullet markers, markdown heading hashes and leading `1.` / `1)`
/// numbering are stripped from both ends of each line.
pub fn parse_outline(raw: &str) -> Vec<String> {
    raw.lines()
        .map(clean_heading)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_decoration(c: char) -> bool {
    matches!(c, '-' | '•' | '*' | '#') || c.is_whitespace()
}

fn clean_heading(line: &str) -> &str {
    let line = line.trim_matches(is_decoration);
    strip_numbering(line).trim_matches(is_decoration)
}

fn strip_numbering(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return line;
    }
    let rest = &line[digits..];
    match rest.chars().next() {
        Some('.') | Some(')') => &rest[1..],
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use proptest::prelude::*;

    fn requester() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn generator(mock: &MockAIProvider) -> ContentGenerator {
        ContentGenerator::new(Arc::new(mock.clone()))
    }

    #[test]
    fn parse_outline_strips_bullets_and_blank_lines() {
        let raw = "- Introduction\n\n• Market Analysis \n* Financials*\n   \n";
        assert_eq!(
            parse_outline(raw),
            vec!["Introduction", "Market Analysis", "Financials"]
        );
    }

    #[test]
    fn parse_outline_strips_markdown_headers_and_numbering() {
        let raw = "## Executive Summary\n1. Background\n2) Risks\n10. Next Steps";
        assert_eq!(
            parse_outline(raw),
            vec!["Executive Summary", "Background", "Risks", "Next Steps"]
        );
    }

    #[test]
    fn parse_outline_keeps_numbers_inside_titles() {
        assert_eq!(parse_outline("2024 Outlook"), vec!["2024 Outlook"]);
        assert_eq!(parse_outline("Q3 2024 Results"), vec!["Q3 2024 Results"]);
    }

    proptest! {
        #[test]
        fn parsed_titles_are_never_blank_or_decorated(raw in "[-•*# a-zA-Z0-9.\n]{0,200}") {
            for title in parse_outline(&raw) {
                prop_assert!(!title.is_empty());
                prop_assert!(!title.starts_with(is_decoration));
                prop_assert!(!title.ends_with(is_decoration));
            }
        }

        #[test]
        fn clean_lines_pass_through_unchanged(words in proptest::collection::vec("[A-Za-z]{1,12}", 1..8)) {
            let raw = words.join("\n");
            prop_assert_eq!(parse_outline(&raw), words);
        }
    }

    #[tokio::test]
    async fn suggest_outline_uses_kind_specific_prompt() {
        let mock = MockAIProvider::new().with_response("- Cover\n- Agenda");

        let titles = generator(&mock)
            .suggest_outline(DocumentKind::Pptx, "Cloud migration", &requester())
            .await
            .unwrap();

        assert_eq!(titles, vec!["Cover", "Agenda"]);
        let calls = mock.get_calls();
        assert_eq!(calls.len(), 1);
        let prompt = calls[0].user_prompt().unwrap();
        assert!(prompt.contains("Cloud migration"));
        assert!(prompt.contains("6-8 concise slide titles"));
        assert_eq!(calls[0].system_prompt.as_deref(), Some(OUTLINE_SYSTEM_PROMPT));
        assert_eq!(calls[0].temperature, Some(OUTLINE_TEMPERATURE));
    }

    #[tokio::test]
    async fn draft_section_trims_reply() {
        let mock = MockAIProvider::new().with_response("  Body text.\n");
        let section = SectionPrompt {
            kind: DocumentKind::Docx,
            main_topic: "Revenue",
            title: "Intro",
        };

        let text = generator(&mock)
            .draft_section(section, &requester(), ProjectId::new())
            .await
            .unwrap();

        assert_eq!(text, "Body text.");
        let calls = mock.get_calls();
        let prompt = calls[0].user_prompt().unwrap();
        assert!(prompt.contains("Section title: Intro"));
        assert!(prompt.contains("detailed narrative section suitable for a Word document"));
        assert_eq!(calls[0].temperature, Some(DRAFT_TEMPERATURE));
        assert!(calls[0]
            .system_prompt
            .as_deref()
            .unwrap()
            .contains("Do NOT use markdown"));
    }

    #[tokio::test]
    async fn refine_content_includes_current_text_and_instruction() {
        let mock = MockAIProvider::new().with_response("Shorter.");
        let section = SectionPrompt {
            kind: DocumentKind::Pptx,
            main_topic: "Revenue",
            title: "Results",
        };

        let text = generator(&mock)
            .refine_content(
                section,
                "Long text",
                "make it shorter",
                &requester(),
                ProjectId::new(),
            )
            .await
            .unwrap();

        assert_eq!(text, "Shorter.");
        let calls = mock.get_calls();
        let prompt = calls[0].user_prompt().unwrap();
        assert!(prompt.contains("PowerPoint slide: Results"));
        assert!(prompt.contains("Current content:\nLong text"));
        assert!(prompt.contains("User refinement request: make it shorter"));
        assert_eq!(calls[0].temperature, Some(REFINE_TEMPERATURE));
    }

    #[tokio::test]
    async fn blank_replies_are_upstream_errors() {
        let mock = MockAIProvider::new()
            .with_response("   \n")
            .with_response("")
            .with_response("- \n#\n\n");
        let section = SectionPrompt {
            kind: DocumentKind::Docx,
            main_topic: "Revenue",
            title: "Intro",
        };
        let generator = generator(&mock);

        let drafted = generator
            .draft_section(section, &requester(), ProjectId::new())
            .await;
        let refined = generator
            .refine_content(section, "Old text", "shorter", &requester(), ProjectId::new())
            .await;
        let outline = generator
            .suggest_outline(DocumentKind::Docx, "Revenue", &requester())
            .await;

        assert!(matches!(drafted, Err(DocumentError::UpstreamGeneration(_))));
        assert!(matches!(refined, Err(DocumentError::UpstreamGeneration(_))));
        assert!(matches!(outline, Err(DocumentError::UpstreamGeneration(_))));
    }

    #[tokio::test]
    async fn provider_failure_becomes_upstream_error() {
        let mock = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });

        let result = generator(&mock)
            .suggest_outline(DocumentKind::Docx, "Anything", &requester())
            .await;

        assert!(matches!(
            result,
            Err(DocumentError::UpstreamGeneration(_))
        ));
    }
}
