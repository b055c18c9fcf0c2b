//! Declarative section and question model.
//!
//! A [`Section`] is one step of the capture sequence; its [`Question`]s are
//! tagged-variant descriptions that the wizard engine interprets. Sections
//! are defined statically in the catalog and never mutated.

use serde::{Deserialize, Serialize};

/// Unique identifier for a section.
pub type SectionId = String;

/// Unique identifier for a question within a section.
pub type QuestionId = String;

/// One step of the capture sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique identifier, also the persistence key suffix.
    pub id: SectionId,
    /// Display title.
    pub title: String,
    /// Intro text shown above the questions.
    pub intro: String,
    /// Position in the fixed sequence (0-based).
    pub index: usize,
    /// Ordered questions.
    pub questions: Vec<Question>,
}

impl Section {
    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// A single answerable prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the section, also the stored field name.
    pub id: QuestionId,
    /// Prompt text.
    pub label: String,
    /// Secondary guidance text (optional).
    #[serde(default)]
    pub hint: Option<String>,
    /// Kind, carrying the kind-specific constraints.
    pub kind: QuestionKind,
    /// Predefined option labels (select kinds only).
    #[serde(default)]
    pub options: Vec<String>,
    /// Whether a free-entry "other" value may be confirmed into the answer.
    #[serde(default)]
    pub allow_custom: bool,
    /// Example strings for the inspire-me affordance; empty = none.
    #[serde(default)]
    pub inspiration: Vec<String>,
}

/// Question kind and its constraints.
///
/// The kind drives validation and the selection-controller behavior; adding
/// a kind here is the single place per-kind logic branches from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Exactly zero or one of the options (or a confirmed custom value).
    SingleSelect,
    /// Up to `max_count` options, insertion-ordered, duplicate-free.
    MultiSelect { max_count: usize },
    /// Free text; complete once the trimmed length reaches `min_length`.
    FreeText { min_length: usize, max_length: usize },
    /// Integer slider; always complete, starts at `default`.
    Scale { min: i64, max: i64, default: i64 },
}

impl QuestionKind {
    /// Capacity of the answer set, where bounded.
    pub fn max_count(&self) -> Option<usize> {
        match self {
            QuestionKind::MultiSelect { max_count } => Some(*max_count),
            _ => None,
        }
    }
}
