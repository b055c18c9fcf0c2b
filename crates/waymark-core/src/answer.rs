//! Per-question answer state and the selection controller.
//!
//! All operations are synchronous and idempotent given the same inputs.
//! Capacity is enforced at the point of addition, never retroactively;
//! duplicate additions and at-capacity additions are no-ops, not errors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::section::{Question, QuestionKind, Section};
use crate::storage::{AnswerValue, SectionAnswers};
use crate::validate;

/// The current value(s) held for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnswerState {
    /// Free text.
    Text { value: String },
    /// Single selection, possibly unset.
    Choice { value: Option<String> },
    /// Bounded multi-selection: insertion-ordered, duplicate-free.
    Choices { values: Vec<String> },
    /// Integer slider position.
    Scale { value: i64 },
}

impl AnswerState {
    /// The empty/default state for a question kind.
    pub fn default_for(kind: &QuestionKind) -> Self {
        match kind {
            QuestionKind::FreeText { .. } => AnswerState::Text {
                value: String::new(),
            },
            QuestionKind::SingleSelect => AnswerState::Choice { value: None },
            QuestionKind::MultiSelect { .. } => AnswerState::Choices { values: Vec::new() },
            QuestionKind::Scale { default, .. } => AnswerState::Scale { value: *default },
        }
    }

    /// Number of occupied selection slots (0 or 1 for scalar kinds).
    pub fn len(&self) -> usize {
        match self {
            AnswerState::Text { value } => usize::from(!value.trim().is_empty()),
            AnswerState::Choice { value } => usize::from(value.is_some()),
            AnswerState::Choices { values } => values.len(),
            AnswerState::Scale { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Answer state plus the custom-entry UI flag.
///
/// `custom_open` tracks the revealed "other" input. It never counts as a
/// selection and is never persisted; only confirmed custom text occupies a
/// slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionState {
    pub answer: AnswerState,
    #[serde(default)]
    pub custom_open: bool,
}

impl QuestionState {
    pub fn default_for(kind: &QuestionKind) -> Self {
        Self {
            answer: AnswerState::default_for(kind),
            custom_open: false,
        }
    }
}

/// Mutable state of one section visit: question id -> answer.
///
/// Owned exclusively by the wizard engine instance for the displayed
/// section; discarded when the user navigates away without submitting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionState {
    answers: HashMap<String, QuestionState>,
}

impl SectionState {
    /// Empty state for every question of `section`.
    pub fn empty(section: &Section) -> Self {
        let answers = section
            .questions
            .iter()
            .map(|q| (q.id.clone(), QuestionState::default_for(&q.kind)))
            .collect();
        Self { answers }
    }

    /// Hydrate from a stored document.
    ///
    /// Missing keys and kind-mismatched values fall back to the question's
    /// default empty state; unknown keys in the document are ignored.
    pub fn from_document(section: &Section, doc: &SectionAnswers) -> Self {
        let mut state = Self::empty(section);
        for question in &section.questions {
            let Some(value) = doc.get(&question.id) else {
                continue;
            };
            let answer = match (&question.kind, value) {
                (QuestionKind::FreeText { max_length, .. }, AnswerValue::Text(text)) => {
                    Some(AnswerState::Text {
                        value: clamp_chars(text, *max_length),
                    })
                }
                (QuestionKind::SingleSelect, AnswerValue::Text(text)) => {
                    let value = (!text.is_empty()).then(|| text.clone());
                    Some(AnswerState::Choice { value })
                }
                (QuestionKind::MultiSelect { max_count }, AnswerValue::List(items)) => {
                    let mut values: Vec<String> = Vec::new();
                    for item in items {
                        if values.len() == *max_count {
                            break;
                        }
                        if !values.contains(item) {
                            values.push(item.clone());
                        }
                    }
                    Some(AnswerState::Choices { values })
                }
                (QuestionKind::Scale { min, max, .. }, AnswerValue::Number(n)) => {
                    Some(AnswerState::Scale {
                        value: (*n).clamp(*min, *max),
                    })
                }
                _ => None,
            };
            if let Some(answer) = answer {
                state.answers.insert(
                    question.id.clone(),
                    QuestionState {
                        answer,
                        custom_open: false,
                    },
                );
            }
        }
        state
    }

    /// Produce the flat document to persist.
    ///
    /// Free text is stored trimmed; every question of the section gets a
    /// key, so a load-then-save round trip drops no fields.
    pub fn to_document(&self, section: &Section) -> SectionAnswers {
        let mut doc = SectionAnswers::new();
        for question in &section.questions {
            let Some(state) = self.answers.get(&question.id) else {
                continue;
            };
            let value = match &state.answer {
                AnswerState::Text { value } => AnswerValue::Text(value.trim().to_string()),
                AnswerState::Choice { value } => {
                    AnswerValue::Text(value.clone().unwrap_or_default())
                }
                AnswerState::Choices { values } => AnswerValue::List(values.clone()),
                AnswerState::Scale { value } => AnswerValue::Number(*value),
            };
            doc.insert(question.id.clone(), value);
        }
        doc
    }

    pub fn question_state(&self, question_id: &str) -> Option<&QuestionState> {
        self.answers.get(question_id)
    }

    fn state_mut(&mut self, question: &Question) -> &mut QuestionState {
        self.answers
            .entry(question.id.clone())
            .or_insert_with(|| QuestionState::default_for(&question.kind))
    }

    // ── Selection controller ─────────────────────────────────────────

    /// Toggle a predefined option.
    ///
    /// Single-select: set, or clear when re-clicked. Multi-select: remove if
    /// present, else append while under capacity. Returns whether the answer
    /// changed.
    pub fn toggle(&mut self, question: &Question, option: &str) -> bool {
        let state = self.state_mut(question);
        match &mut state.answer {
            AnswerState::Choice { value } => {
                if value.as_deref() == Some(option) {
                    *value = None;
                } else {
                    *value = Some(option.to_string());
                }
                true
            }
            AnswerState::Choices { values } => {
                if let Some(pos) = values.iter().position(|v| v == option) {
                    values.remove(pos);
                    return true;
                }
                let max = question.kind.max_count().unwrap_or(usize::MAX);
                if values.len() < max {
                    values.push(option.to_string());
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Reveal the custom-entry input. Does not mutate the answer set.
    pub fn open_custom(&mut self, question: &Question) {
        if question.allow_custom {
            self.state_mut(question).custom_open = true;
        }
    }

    /// Hide the custom-entry input without confirming.
    pub fn close_custom(&mut self, question: &Question) {
        self.state_mut(question).custom_open = false;
    }

    /// Confirm custom text into the answer set.
    ///
    /// Appends (or, for single-select, sets) the trimmed text under the same
    /// capacity and duplicate rules as [`SectionState::toggle`], then closes
    /// the input. No-op on empty text or a full set.
    pub fn confirm_custom(&mut self, question: &Question, text: &str) -> bool {
        if !question.allow_custom {
            return false;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let state = self.state_mut(question);
        let added = match &mut state.answer {
            AnswerState::Choice { value } => {
                *value = Some(trimmed.to_string());
                true
            }
            AnswerState::Choices { values } => {
                let max = question.kind.max_count().unwrap_or(usize::MAX);
                if values.iter().any(|v| v == trimmed) || values.len() >= max {
                    false
                } else {
                    values.push(trimmed.to_string());
                    true
                }
            }
            _ => false,
        };
        if added {
            state.custom_open = false;
        }
        added
    }

    /// Remove a value unconditionally from a multi-select set, or clear a
    /// matching single-select value.
    pub fn remove(&mut self, question: &Question, value: &str) -> bool {
        let state = self.state_mut(question);
        match &mut state.answer {
            AnswerState::Choice { value: current } => {
                if current.as_deref() == Some(value) {
                    *current = None;
                    true
                } else {
                    false
                }
            }
            AnswerState::Choices { values } => {
                if let Some(pos) = values.iter().position(|v| v == value) {
                    values.remove(pos);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Overwrite a free-text answer, clamped to the question's `max_length`.
    pub fn set_text(&mut self, question: &Question, text: &str) -> bool {
        let QuestionKind::FreeText { max_length, .. } = question.kind else {
            return false;
        };
        let clamped = clamp_chars(text, max_length);
        let state = self.state_mut(question);
        state.answer = AnswerState::Text { value: clamped };
        true
    }

    /// Move a scale answer, clamped to the question's range.
    pub fn set_scale(&mut self, question: &Question, value: i64) -> bool {
        let QuestionKind::Scale { min, max, .. } = question.kind else {
            return false;
        };
        let state = self.state_mut(question);
        state.answer = AnswerState::Scale {
            value: value.clamp(min, max),
        };
        true
    }

    // ── Derived completion ───────────────────────────────────────────

    /// Number of complete questions in section order.
    pub fn completed_count(&self, section: &Section) -> usize {
        section
            .questions
            .iter()
            .filter(|q| self.is_complete(q))
            .count()
    }

    /// True iff every question of the section is complete.
    pub fn is_valid(&self, section: &Section) -> bool {
        section.questions.iter().all(|q| self.is_complete(q))
    }

    /// Ids of the questions that are still incomplete, in section order.
    pub fn incomplete(&self, section: &Section) -> Vec<String> {
        section
            .questions
            .iter()
            .filter(|q| !self.is_complete(q))
            .map(|q| q.id.clone())
            .collect()
    }

    fn is_complete(&self, question: &Question) -> bool {
        self.question_state(&question.id)
            .map(|s| validate::completion(question, s).complete)
            .unwrap_or(false)
    }
}

/// Truncate to at most `max` characters (not bytes).
fn clamp_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Catalog;
    use proptest::prelude::*;

    fn question(kind: QuestionKind, allow_custom: bool) -> Question {
        Question {
            id: "q".into(),
            label: "Q".into(),
            hint: None,
            kind,
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            allow_custom,
            inspiration: Vec::new(),
        }
    }

    fn section_of(q: Question) -> Section {
        Section {
            id: "s".into(),
            title: "S".into(),
            intro: String::new(),
            index: 0,
            questions: vec![q],
        }
    }

    #[test]
    fn multi_select_respects_capacity() {
        let q = question(QuestionKind::MultiSelect { max_count: 3 }, false);
        let section = section_of(q.clone());
        let mut state = SectionState::empty(&section);

        assert!(state.toggle(&q, "a"));
        assert!(state.toggle(&q, "b"));
        assert!(state.toggle(&q, "c"));
        // Fourth distinct option leaves the set unchanged at 3 elements.
        assert!(!state.toggle(&q, "d"));
        let AnswerState::Choices { values } = &state.question_state("q").unwrap().answer else {
            panic!("expected choices");
        };
        assert_eq!(values, &["a", "b", "c"]);
    }

    #[test]
    fn toggle_removes_when_present() {
        let q = question(QuestionKind::MultiSelect { max_count: 3 }, false);
        let section = section_of(q.clone());
        let mut state = SectionState::empty(&section);

        state.toggle(&q, "a");
        state.toggle(&q, "b");
        state.toggle(&q, "a");
        let AnswerState::Choices { values } = &state.question_state("q").unwrap().answer else {
            panic!("expected choices");
        };
        assert_eq!(values, &["b"]);
    }

    #[test]
    fn toggle_at_capacity_is_idempotent() {
        let q = question(QuestionKind::MultiSelect { max_count: 2 }, false);
        let section = section_of(q.clone());
        let mut state = SectionState::empty(&section);

        state.toggle(&q, "a");
        state.toggle(&q, "b");
        assert!(!state.toggle(&q, "c"));
        assert!(!state.toggle(&q, "c"));
        assert_eq!(state.question_state("q").unwrap().answer.len(), 2);
    }

    #[test]
    fn single_select_set_and_clear_on_reclick() {
        let q = question(QuestionKind::SingleSelect, false);
        let section = section_of(q.clone());
        let mut state = SectionState::empty(&section);

        state.toggle(&q, "a");
        assert_eq!(
            state.question_state("q").unwrap().answer,
            AnswerState::Choice {
                value: Some("a".into())
            }
        );
        state.toggle(&q, "b");
        assert_eq!(
            state.question_state("q").unwrap().answer,
            AnswerState::Choice {
                value: Some("b".into())
            }
        );
        state.toggle(&q, "b");
        assert_eq!(
            state.question_state("q").unwrap().answer,
            AnswerState::Choice { value: None }
        );
    }

    #[test]
    fn custom_entry_does_not_count_until_confirmed() {
        let q = question(QuestionKind::MultiSelect { max_count: 3 }, true);
        let section = section_of(q.clone());
        let mut state = SectionState::empty(&section);

        state.open_custom(&q);
        assert!(state.question_state("q").unwrap().custom_open);
        assert!(state.question_state("q").unwrap().answer.is_empty());
        assert_eq!(state.completed_count(&section), 0);

        assert!(state.confirm_custom(&q, "  my own value  "));
        assert!(!state.question_state("q").unwrap().custom_open);
        let AnswerState::Choices { values } = &state.question_state("q").unwrap().answer else {
            panic!("expected choices");
        };
        assert_eq!(values, &["my own value"]);
    }

    #[test]
    fn confirm_custom_no_ops() {
        let q = question(QuestionKind::MultiSelect { max_count: 2 }, true);
        let section = section_of(q.clone());
        let mut state = SectionState::empty(&section);

        assert!(!state.confirm_custom(&q, "   "));
        assert!(state.confirm_custom(&q, "x"));
        // Duplicate is a no-op, not an error.
        assert!(!state.confirm_custom(&q, "x"));
        state.toggle(&q, "a");
        // At capacity.
        assert!(!state.confirm_custom(&q, "y"));
        assert_eq!(state.question_state("q").unwrap().answer.len(), 2);
    }

    #[test]
    fn remove_clears_values() {
        let q = question(QuestionKind::MultiSelect { max_count: 3 }, false);
        let section = section_of(q.clone());
        let mut state = SectionState::empty(&section);
        state.toggle(&q, "a");
        state.toggle(&q, "b");
        assert!(state.remove(&q, "a"));
        assert!(!state.remove(&q, "a"));

        let single = question(QuestionKind::SingleSelect, false);
        let section = section_of(single.clone());
        let mut state = SectionState::empty(&section);
        state.toggle(&single, "a");
        assert!(state.remove(&single, "a"));
        assert_eq!(
            state.question_state("q").unwrap().answer,
            AnswerState::Choice { value: None }
        );
    }

    #[test]
    fn set_text_clamps_to_max_length() {
        let q = question(
            QuestionKind::FreeText {
                min_length: 1,
                max_length: 5,
            },
            false,
        );
        let section = section_of(q.clone());
        let mut state = SectionState::empty(&section);
        state.set_text(&q, "abcdefgh");
        assert_eq!(
            state.question_state("q").unwrap().answer,
            AnswerState::Text {
                value: "abcde".into()
            }
        );
    }

    #[test]
    fn document_round_trip_preserves_fields() {
        let catalog = Catalog::builtin();
        let section = catalog.by_id("identity").unwrap();
        let mut state = SectionState::empty(section);

        let story = section.question("story").unwrap();
        let motivations = section.question("motivations").unwrap();
        let impact = section.question("impact").unwrap();
        let clarity = section.question("clarity").unwrap();

        state.set_text(story, "a story about myself");
        state.toggle(motivations, "Problem solving");
        state.confirm_custom(motivations, "building things");
        state.toggle(impact, "Data and analytics");
        state.set_scale(clarity, 80);

        let doc = state.to_document(section);
        let rehydrated = SectionState::from_document(section, &doc);
        assert_eq!(rehydrated.to_document(section), doc);
        assert_eq!(rehydrated.completed_count(section), 4);
    }

    #[test]
    fn hydration_tolerates_missing_and_unknown_keys() {
        let catalog = Catalog::builtin();
        let section = catalog.by_id("identity").unwrap();

        let mut doc = SectionAnswers::new();
        doc.insert("story", AnswerValue::Text("just long enough".into()));
        doc.insert("not_a_question", AnswerValue::Number(1));

        let state = SectionState::from_document(section, &doc);
        assert_eq!(state.completed_count(section), 2); // story + always-complete clarity
        assert!(state.question_state("motivations").unwrap().answer.is_empty());
    }

    #[test]
    fn hydration_tolerates_kind_mismatch() {
        let catalog = Catalog::builtin();
        let section = catalog.by_id("identity").unwrap();

        let mut doc = SectionAnswers::new();
        doc.insert("motivations", AnswerValue::Text("not a list".into()));
        let state = SectionState::from_document(section, &doc);
        assert!(state.question_state("motivations").unwrap().answer.is_empty());
    }

    proptest! {
        /// For any interleaving of toggle/confirm_custom calls, the answer
        /// set never exceeds capacity and never holds duplicates.
        #[test]
        fn bounded_set_invariants(ops in proptest::collection::vec((0..6usize, ".{0,12}"), 0..40)) {
            let q = question(QuestionKind::MultiSelect { max_count: 3 }, true);
            let section = section_of(q.clone());
            let mut state = SectionState::empty(&section);

            for (op, text) in ops {
                match op {
                    0 => { state.toggle(&q, "a"); }
                    1 => { state.toggle(&q, "b"); }
                    2 => { state.toggle(&q, "c"); }
                    3 => { state.toggle(&q, "d"); }
                    4 => { state.confirm_custom(&q, &text); }
                    _ => { state.remove(&q, &text); }
                }
                let AnswerState::Choices { values } = &state.question_state("q").unwrap().answer else {
                    panic!("expected choices");
                };
                prop_assert!(values.len() <= 3);
                let unique: std::collections::HashSet<_> = values.iter().collect();
                prop_assert_eq!(unique.len(), values.len());
            }
        }
    }
}
