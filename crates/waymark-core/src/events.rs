use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::section::{QuestionId, SectionId};
use crate::wizard::WizardState;

/// Every externally visible state change in a section visit produces an
/// Event. Hosts poll or subscribe; the engine never blocks on a listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Section state is ready for edits (hydrated or fresh).
    SectionEntered {
        section_id: SectionId,
        hydrated: bool,
        completed_count: usize,
        total_questions: usize,
        at: DateTime<Utc>,
    },
    /// Load failed; the section starts empty. Non-fatal.
    LoadDegraded {
        section_id: SectionId,
        reason: String,
        at: DateTime<Utc>,
    },
    /// An edit changed a question's answer.
    AnswerChanged {
        section_id: SectionId,
        question_id: QuestionId,
        complete: bool,
        completed_count: usize,
        is_valid: bool,
        at: DateTime<Utc>,
    },
    /// An inspiration suggestion is being shown.
    InspirationShown {
        question_id: QuestionId,
        text: String,
        at: DateTime<Utc>,
    },
    /// The shown suggestion timed out.
    InspirationExpired {
        question_id: QuestionId,
        at: DateTime<Utc>,
    },
    /// A save has been started; the emitted document is on its way to the
    /// store. Submission is disabled until the save resolves.
    SaveStarted {
        section_id: SectionId,
        at: DateTime<Utc>,
    },
    /// The save succeeded; the advance delay is now running.
    SaveAcknowledged {
        section_id: SectionId,
        at: DateTime<Utc>,
    },
    /// The save failed; the user may edit and retry.
    SaveFailed {
        section_id: SectionId,
        reason: String,
        at: DateTime<Utc>,
    },
    /// The acknowledge delay elapsed; control passes to the router.
    Advanced {
        section_id: SectionId,
        next: Option<SectionId>,
        at: DateTime<Utc>,
    },
    /// Full state snapshot for host rendering.
    StateSnapshot {
        state: WizardState,
        section_id: SectionId,
        completed_count: usize,
        total_questions: usize,
        is_valid: bool,
        last_error: Option<String>,
        at: DateTime<Utc>,
    },
}
