//! # Waymark Core Library
//!
//! This library provides the core business logic for the Waymark guided
//! onboarding flow. It implements a CLI-first philosophy where the whole
//! capture flow is available via a standalone CLI binary, with any GUI being
//! a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Wizard Engine**: A wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` for the timed transitions
//! - **Section Model**: Declarative description of each section's questions;
//!   the seven built-in sections live in the catalog
//! - **Storage**: SQLite-based answer documents and TOML-based configuration
//! - **Inspiration**: Randomized example suggestions behind a trait seam
//!
//! ## Key Components
//!
//! - [`WizardEngine`]: Core capture state machine
//! - [`SectionRunner`]: Async save-then-advance orchestration
//! - [`Catalog`]: The built-in section sequence
//! - [`Database`]: Answer document persistence
//! - [`Config`]: Application configuration management

pub mod answer;
pub mod error;
pub mod events;
pub mod inspire;
pub mod section;
pub mod storage;
pub mod validate;
pub mod wizard;

pub use answer::{AnswerState, QuestionState, SectionState};
pub use error::{ConfigError, CoreError, StoreError, SubmitError};
pub use events::Event;
pub use inspire::{InspirationSource, RandomInspiration, SeededInspiration};
pub use section::{Catalog, Question, QuestionId, QuestionKind, Section, SectionId};
pub use storage::{AnswerValue, Config, Database, MemoryStore, SectionAnswers, SectionStore};
pub use validate::{completion, slots_remaining, Completion};
pub use wizard::{Router, SectionRunner, ShownInspiration, WizardEngine, WizardState, WizardTiming};
