//! Field validators.
//!
//! Total functions over any legal answer state; validators never panic and
//! never error. Completion gates navigation, the detail string feeds the
//! per-question indicator.

use crate::answer::{AnswerState, QuestionState};
use crate::section::{Question, QuestionKind};

/// Verdict for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub complete: bool,
    pub detail: String,
}

/// Decide whether `state` satisfies `question`'s constraint.
///
/// - free text: complete iff the trimmed length reaches `min_length`; the
///   detail reports characters remaining, or used of `max_length` once
///   complete;
/// - single select: complete iff a value is set;
/// - multi select: complete iff at least one selection;
/// - scale: always complete.
pub fn completion(question: &Question, state: &QuestionState) -> Completion {
    match (&question.kind, &state.answer) {
        (
            QuestionKind::FreeText {
                min_length,
                max_length,
            },
            AnswerState::Text { value },
        ) => {
            let used = value.trim().chars().count();
            if used >= *min_length {
                Completion {
                    complete: true,
                    detail: format!("{used}/{max_length} characters"),
                }
            } else {
                Completion {
                    complete: false,
                    detail: format!("{} characters remaining", min_length - used),
                }
            }
        }
        (QuestionKind::SingleSelect, AnswerState::Choice { value }) => match value {
            Some(_) => Completion {
                complete: true,
                detail: "selected".into(),
            },
            None => Completion {
                complete: false,
                detail: "selection required".into(),
            },
        },
        (QuestionKind::MultiSelect { max_count }, AnswerState::Choices { values }) => {
            if values.is_empty() {
                Completion {
                    complete: false,
                    detail: "select at least one".into(),
                }
            } else {
                Completion {
                    complete: true,
                    detail: format!("{} of {max_count} selected", values.len()),
                }
            }
        }
        (QuestionKind::Scale { .. }, AnswerState::Scale { value }) => Completion {
            complete: true,
            detail: value.to_string(),
        },
        // Kind/state mismatch: treat as not yet answered.
        _ => Completion {
            complete: false,
            detail: "unanswered".into(),
        },
    }
}

/// Non-blocking indicator: open slots toward `max_count`.
///
/// `None` for unbounded kinds.
pub fn slots_remaining(question: &Question, state: &QuestionState) -> Option<usize> {
    let max = question.kind.max_count()?;
    Some(max.saturating_sub(state.answer.len()))
}
