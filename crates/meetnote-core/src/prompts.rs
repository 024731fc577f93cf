//! Fixed prompt templates for the supported meeting transformations.
//!
//! Templates live here as a single mapping from action kind to instruction
//! text so dispatch logic never embeds prompt literals and tests can assert
//! on the mapping directly.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// One of the four document-producing transformations.
///
/// Chat mode is handled separately via [`chat_prompt`] since it interpolates
/// the user's question and produces no document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Minutes,
    Summary,
    ActionItems,
    Insights,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown action kind: {0} (expected minutes, summary, action_items or insights)")]
pub struct UnknownAction(pub String);

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Minutes,
        ActionKind::Summary,
        ActionKind::ActionItems,
        ActionKind::Insights,
    ];

    /// The fixed instruction string dispatched to the model.
    pub fn template(&self) -> &'static str {
        match self {
            ActionKind::Minutes => {
                "Generate detailed and structured minutes from the uploaded meeting recording. \
                 Include key points, decisions made, and action items."
            }
            ActionKind::Summary => {
                "Summarize the uploaded meeting recording. Include the main topics discussed, \
                 major takeaways, and any conclusions reached."
            }
            ActionKind::ActionItems => {
                "Extract all actionable items discussed in the meeting. Provide a list of tasks, \
                 responsible parties, and deadlines if mentioned."
            }
            ActionKind::Insights => {
                "Provide high-level insights and analytics based on the meeting. Highlight key \
                 trends, concerns, and positive outcomes."
            }
        }
    }

    /// Fixed scratch file name for the exported document. Regenerating an
    /// action overwrites the prior file of the same name.
    pub fn document_file_name(&self) -> &'static str {
        match self {
            ActionKind::Minutes => "meeting_minutes.docx",
            ActionKind::Summary => "meeting_summary.docx",
            ActionKind::ActionItems => "action_items.docx",
            ActionKind::Insights => "meeting_insights.docx",
        }
    }

    /// Heading written at the top of the exported document.
    pub fn document_title(&self) -> &'static str {
        match self {
            ActionKind::Minutes => "Meeting Minutes",
            ActionKind::Summary => "Meeting Summary",
            ActionKind::ActionItems => "Action Items",
            ActionKind::Insights => "Meeting Insights",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Minutes => "minutes",
            ActionKind::Summary => "summary",
            ActionKind::ActionItems => "action_items",
            ActionKind::Insights => "insights",
        }
    }
}

impl FromStr for ActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minutes" => Ok(ActionKind::Minutes),
            "summary" => Ok(ActionKind::Summary),
            "action_items" => Ok(ActionKind::ActionItems),
            "insights" => Ok(ActionKind::Insights),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chat instruction with the user's free-text question interpolated.
pub fn chat_prompt(question: &str) -> String {
    format!(
        "Analyse the video meeting and answer the users questions concisely.\n\nQuestion: {}",
        question
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_templates_are_distinct() {
        let templates: HashSet<&str> = ActionKind::ALL.iter().map(|k| k.template()).collect();
        assert_eq!(templates.len(), ActionKind::ALL.len());
    }

    #[test]
    fn test_document_file_names_are_fixed_and_distinct() {
        let names: HashSet<&str> = ActionKind::ALL
            .iter()
            .map(|k| k.document_file_name())
            .collect();
        assert_eq!(names.len(), 4);
        assert!(names.iter().all(|n| n.ends_with(".docx")));
        assert_eq!(
            ActionKind::Minutes.document_file_name(),
            "meeting_minutes.docx"
        );
    }

    #[test]
    fn test_parse_round_trip() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.as_str().parse::<ActionKind>().unwrap(), kind);
        }
        assert!("transcribe".parse::<ActionKind>().is_err());
    }

    #[test]
    fn test_chat_prompt_interpolates_question() {
        let prompt = chat_prompt("Who owns the rollout?");
        assert!(prompt.contains("Question: Who owns the rollout?"));
        assert!(prompt.starts_with("Analyse the video meeting"));
    }
}
