//! Wizard engine: the section capture state machine.
//!
//! The engine is wall-clock based and has no internal threads: the caller
//! is responsible for calling `tick()` periodically to fire the timed
//! transitions (advance after acknowledge, inspiration expiry).
//!
//! ## State Transitions
//!
//! ```text
//! Loading -> Ready -> Saving -> (Acknowledged -> Advancing) | Error
//!                       ^                                       |
//!                       └────────────── retry ─────────────────┘
//! ```
//!
//! `Error` accepts edits and resubmission exactly like `Ready`; the save
//! may be retried indefinitely. Invalid submissions are pure guards: they
//! produce an error, no transition, and no persistence attempt.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::answer::SectionState;
use crate::error::SubmitError;
use crate::events::Event;
use crate::inspire::InspirationSource;
use crate::section::{Question, Section, SectionId};
use crate::storage::SectionAnswers;
use crate::validate::{self, Completion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardState {
    /// Hydration from the store is pending.
    Loading,
    /// Accepting edits.
    Ready,
    /// A save is in flight; submission is disabled.
    Saving,
    /// Save succeeded; the advance delay is running.
    Acknowledged,
    /// Delay elapsed; control belongs to the router.
    Advancing,
    /// Save failed; accepting edits and resubmission.
    Error,
}

/// Timed-transition durations.
///
/// The contractual values are 2000 ms before advancing after a successful
/// save and 4000 ms before a shown inspiration is dismissed; tests inject
/// zeros.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WizardTiming {
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    #[serde(default = "default_inspire_timeout_ms")]
    pub inspire_timeout_ms: u64,
}

fn default_advance_delay_ms() -> u64 {
    2000
}
fn default_inspire_timeout_ms() -> u64 {
    4000
}

impl Default for WizardTiming {
    fn default() -> Self {
        Self {
            advance_delay_ms: default_advance_delay_ms(),
            inspire_timeout_ms: default_inspire_timeout_ms(),
        }
    }
}

impl WizardTiming {
    /// Zero delays, for tests.
    pub fn immediate() -> Self {
        Self {
            advance_delay_ms: 0,
            inspire_timeout_ms: 0,
        }
    }
}

/// A transient suggestion currently on display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShownInspiration {
    pub question_id: String,
    pub text: String,
    /// Auto-dismiss deadline (ms since epoch).
    expires_epoch_ms: u64,
}

/// One section visit.
///
/// Owns the section's answer state exclusively; serializable so a host can
/// persist and restore a visit in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardEngine {
    section: Section,
    /// Id of the following section in the fixed sequence, if any.
    next_section: Option<SectionId>,
    state: WizardState,
    answers: SectionState,
    timing: WizardTiming,
    /// Reason of the last failed save (shown while in `Error`).
    #[serde(default)]
    last_error: Option<String>,
    /// Deadline for the Acknowledged -> Advancing transition.
    #[serde(default)]
    advance_deadline_ms: Option<u64>,
    /// Suggestion currently shown, if any.
    #[serde(default)]
    inspiration: Option<ShownInspiration>,
}

impl WizardEngine {
    /// Fresh visit starting directly in `Ready` with empty state.
    pub fn new(section: Section, next_section: Option<SectionId>, timing: WizardTiming) -> Self {
        let answers = SectionState::empty(&section);
        Self {
            section,
            next_section,
            state: WizardState::Ready,
            answers,
            timing,
            last_error: None,
            advance_deadline_ms: None,
            inspiration: None,
        }
    }

    /// Visit that waits for hydration from the store.
    pub fn new_loading(
        section: Section,
        next_section: Option<SectionId>,
        timing: WizardTiming,
    ) -> Self {
        let mut engine = Self::new(section, next_section, timing);
        engine.state = WizardState::Loading;
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn next_section(&self) -> Option<&SectionId> {
        self.next_section.as_ref()
    }

    pub fn answers(&self) -> &SectionState {
        &self.answers
    }

    pub fn is_valid(&self) -> bool {
        self.answers.is_valid(&self.section)
    }

    pub fn completed_count(&self) -> usize {
        self.answers.completed_count(&self.section)
    }

    pub fn total_questions(&self) -> usize {
        self.section.questions.len()
    }

    /// 0.0 .. 1.0 share of complete questions.
    pub fn progress(&self) -> f64 {
        let total = self.total_questions();
        if total == 0 {
            return 0.0;
        }
        self.completed_count() as f64 / total as f64
    }

    /// Verdict for one question, or `None` for an unknown id.
    pub fn completion_of(&self, question_id: &str) -> Option<Completion> {
        let question = self.section.question(question_id)?;
        let state = self.answers.question_state(question_id)?;
        Some(validate::completion(question, state))
    }

    /// Open slots toward `max_count`, where bounded.
    pub fn slots_remaining(&self, question_id: &str) -> Option<usize> {
        let question = self.section.question(question_id)?;
        let state = self.answers.question_state(question_id)?;
        validate::slots_remaining(question, state)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn shown_inspiration(&self) -> Option<&ShownInspiration> {
        self.inspiration.as_ref()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            section_id: self.section.id.clone(),
            completed_count: self.completed_count(),
            total_questions: self.total_questions(),
            is_valid: self.is_valid(),
            last_error: self.last_error.clone(),
            at: Utc::now(),
        }
    }

    // ── Hydration ────────────────────────────────────────────────────

    /// Resolve a pending load.
    ///
    /// `None` (store had no document) hydrates to empty state. Also usable
    /// from `Ready` to re-hydrate a fresh visit.
    pub fn hydrate(&mut self, doc: Option<&SectionAnswers>) -> Option<Event> {
        if !matches!(self.state, WizardState::Loading | WizardState::Ready) {
            return None;
        }
        self.answers = match doc {
            Some(doc) => SectionState::from_document(&self.section, doc),
            None => SectionState::empty(&self.section),
        };
        self.state = WizardState::Ready;
        Some(Event::SectionEntered {
            section_id: self.section.id.clone(),
            hydrated: doc.is_some(),
            completed_count: self.completed_count(),
            total_questions: self.total_questions(),
            at: Utc::now(),
        })
    }

    /// Resolve a pending load that failed.
    ///
    /// Data loss is tolerated: the section starts empty and the user can
    /// fill it from scratch. The returned warning is non-fatal.
    pub fn load_failed(&mut self, reason: &str) -> Option<Event> {
        if self.state != WizardState::Loading {
            return None;
        }
        self.answers = SectionState::empty(&self.section);
        self.state = WizardState::Ready;
        Some(Event::LoadDegraded {
            section_id: self.section.id.clone(),
            reason: reason.to_string(),
            at: Utc::now(),
        })
    }

    // ── Edits ────────────────────────────────────────────────────────

    fn can_edit(&self) -> bool {
        matches!(self.state, WizardState::Ready | WizardState::Error)
    }

    fn question(&self, question_id: &str) -> Option<Question> {
        self.section.question(question_id).cloned()
    }

    fn answer_changed(&self, question_id: &str) -> Option<Event> {
        let complete = self.completion_of(question_id)?.complete;
        Some(Event::AnswerChanged {
            section_id: self.section.id.clone(),
            question_id: question_id.to_string(),
            complete,
            completed_count: self.completed_count(),
            is_valid: self.is_valid(),
            at: Utc::now(),
        })
    }

    /// Toggle a predefined option.
    pub fn toggle(&mut self, question_id: &str, option: &str) -> Option<Event> {
        if !self.can_edit() {
            return None;
        }
        let question = self.question(question_id)?;
        self.answers
            .toggle(&question, option)
            .then(|| self.answer_changed(question_id))
            .flatten()
    }

    /// Reveal the custom-entry input; never mutates the answer set.
    pub fn open_custom(&mut self, question_id: &str) {
        if !self.can_edit() {
            return;
        }
        if let Some(question) = self.question(question_id) {
            self.answers.open_custom(&question);
        }
    }

    /// Hide the custom-entry input without confirming.
    pub fn close_custom(&mut self, question_id: &str) {
        if !self.can_edit() {
            return;
        }
        if let Some(question) = self.question(question_id) {
            self.answers.close_custom(&question);
        }
    }

    /// Confirm custom text into the answer set.
    pub fn confirm_custom(&mut self, question_id: &str, text: &str) -> Option<Event> {
        if !self.can_edit() {
            return None;
        }
        let question = self.question(question_id)?;
        self.answers
            .confirm_custom(&question, text)
            .then(|| self.answer_changed(question_id))
            .flatten()
    }

    /// Remove a value from the answer.
    pub fn remove(&mut self, question_id: &str, value: &str) -> Option<Event> {
        if !self.can_edit() {
            return None;
        }
        let question = self.question(question_id)?;
        self.answers
            .remove(&question, value)
            .then(|| self.answer_changed(question_id))
            .flatten()
    }

    /// Overwrite a free-text answer.
    pub fn set_text(&mut self, question_id: &str, text: &str) -> Option<Event> {
        if !self.can_edit() {
            return None;
        }
        let question = self.question(question_id)?;
        self.answers
            .set_text(&question, text)
            .then(|| self.answer_changed(question_id))
            .flatten()
    }

    /// Move a scale answer.
    pub fn set_scale(&mut self, question_id: &str, value: i64) -> Option<Event> {
        if !self.can_edit() {
            return None;
        }
        let question = self.question(question_id)?;
        self.answers
            .set_scale(&question, value)
            .then(|| self.answer_changed(question_id))
            .flatten()
    }

    // ── Inspiration ──────────────────────────────────────────────────

    /// Draw a suggestion for a question and show it.
    ///
    /// Re-drawing before expiry replaces the text and resets the deadline.
    /// Suggestion-only: answer state is never touched.
    pub fn inspire(
        &mut self,
        question_id: &str,
        source: &mut dyn InspirationSource,
    ) -> Option<Event> {
        if !self.can_edit() {
            return None;
        }
        let question = self.question(question_id)?;
        let text = source.draw(&question.inspiration)?.to_string();
        self.inspiration = Some(ShownInspiration {
            question_id: question_id.to_string(),
            text: text.clone(),
            expires_epoch_ms: now_ms() + self.timing.inspire_timeout_ms,
        });
        Some(Event::InspirationShown {
            question_id: question_id.to_string(),
            text,
            at: Utc::now(),
        })
    }

    // ── Save protocol ────────────────────────────────────────────────

    /// Request the save-then-advance protocol.
    ///
    /// Pure guard on failure: a missing identity, an incomplete section or
    /// an in-flight save reject the submission with no state transition and
    /// no persistence attempt. On success the engine enters `Saving` and
    /// the caller must persist [`WizardEngine::document`] and report back
    /// via [`WizardEngine::save_succeeded`] / [`WizardEngine::save_failed`].
    pub fn submit(&mut self, user_id: Option<&str>) -> Result<Event, SubmitError> {
        match self.state {
            WizardState::Saving => return Err(SubmitError::SaveInFlight),
            WizardState::Ready | WizardState::Error => {}
            _ => return Err(SubmitError::NotAccepting),
        }
        if user_id.is_none() {
            return Err(SubmitError::SessionMissing);
        }
        let incomplete = self.answers.incomplete(&self.section);
        if !incomplete.is_empty() {
            return Err(SubmitError::Validation { incomplete });
        }
        self.state = WizardState::Saving;
        self.last_error = None;
        Ok(Event::SaveStarted {
            section_id: self.section.id.clone(),
            at: Utc::now(),
        })
    }

    /// The document to persist for the current answers.
    pub fn document(&self) -> SectionAnswers {
        self.answers.to_document(&self.section)
    }

    /// Report a successful save. Starts the advance delay.
    pub fn save_succeeded(&mut self) -> Option<Event> {
        if self.state != WizardState::Saving {
            return None;
        }
        self.state = WizardState::Acknowledged;
        self.advance_deadline_ms = Some(now_ms() + self.timing.advance_delay_ms);
        Some(Event::SaveAcknowledged {
            section_id: self.section.id.clone(),
            at: Utc::now(),
        })
    }

    /// Report a failed save. No per-question state is lost; the user may
    /// retry indefinitely.
    pub fn save_failed(&mut self, reason: &str) -> Option<Event> {
        if self.state != WizardState::Saving {
            return None;
        }
        self.state = WizardState::Error;
        self.last_error = Some(reason.to_string());
        Some(Event::SaveFailed {
            section_id: self.section.id.clone(),
            reason: reason.to_string(),
            at: Utc::now(),
        })
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// Call periodically. Fires at most one timed transition per call:
    /// inspiration expiry first, then the acknowledge-delay advance.
    pub fn tick(&mut self) -> Option<Event> {
        let now = now_ms();

        if let Some(shown) = &self.inspiration {
            if now >= shown.expires_epoch_ms {
                let question_id = shown.question_id.clone();
                self.inspiration = None;
                return Some(Event::InspirationExpired {
                    question_id,
                    at: Utc::now(),
                });
            }
        }

        if self.state == WizardState::Acknowledged {
            if let Some(deadline) = self.advance_deadline_ms {
                if now >= deadline {
                    self.state = WizardState::Advancing;
                    self.advance_deadline_ms = None;
                    return Some(Event::Advanced {
                        section_id: self.section.id.clone(),
                        next: self.next_section.clone(),
                        at: Utc::now(),
                    });
                }
            }
        }

        None
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
