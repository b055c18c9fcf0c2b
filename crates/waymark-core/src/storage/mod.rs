//! Persistence layer: store contract, SQLite store, TOML configuration.
//!
//! The engine only ever talks to the [`SectionStore`] trait; the SQLite
//! [`Database`] is the default host implementation and [`MemoryStore`] backs
//! tests and embedded hosts.

mod config;
pub mod database;

pub use config::Config;
pub use database::Database;

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::section::QuestionId;

/// Returns `~/.config/waymark[-dev]/` based on WAYMARK_ENV.
///
/// Set WAYMARK_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WAYMARK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("waymark-dev")
    } else {
        base_dir.join("waymark")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// One stored answer value.
///
/// Stored documents are flat maps of these; the concrete variant follows the
/// question kind (text and single-select store `Text`, multi-select stores
/// `List`, scale stores `Number`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    List(Vec<String>),
    Number(i64),
}

/// The flat persisted document for one (user, section) pair.
///
/// Keys are question ids. Hosts must tolerate missing keys (each missing
/// question hydrates to its default) and unknown keys (ignored).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionAnswers(pub BTreeMap<QuestionId, AnswerValue>);

impl SectionAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(question_id)
    }

    pub fn insert(&mut self, question_id: impl Into<QuestionId>, value: AnswerValue) {
        self.0.insert(question_id.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.0.iter()
    }
}

/// Persistence adapter contract consumed by the wizard engine.
///
/// Documents are keyed by (user, section). `load` returning `Ok(None)` means
/// the document does not exist yet and is treated as an empty section.
pub trait SectionStore {
    fn load(&self, user_id: &str, section_id: &str)
        -> Result<Option<SectionAnswers>, StoreError>;

    fn save(
        &self,
        user_id: &str,
        section_id: &str,
        answers: &SectionAnswers,
    ) -> Result<(), StoreError>;
}

impl<S: SectionStore + ?Sized> SectionStore for &S {
    fn load(
        &self,
        user_id: &str,
        section_id: &str,
    ) -> Result<Option<SectionAnswers>, StoreError> {
        (**self).load(user_id, section_id)
    }

    fn save(
        &self,
        user_id: &str,
        section_id: &str,
        answers: &SectionAnswers,
    ) -> Result<(), StoreError> {
        (**self).save(user_id, section_id, answers)
    }
}

/// In-memory store for tests and embedded hosts.
///
/// Supports failure injection so save/load error paths can be exercised
/// without a real backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<(String, String), SectionAnswers>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
    load_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `load` fail.
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `save` fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of save attempts (including failed ones).
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Number of load attempts (including failed ones).
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }
}

impl SectionStore for MemoryStore {
    fn load(
        &self,
        user_id: &str,
        section_id: &str,
    ) -> Result<Option<SectionAnswers>, StoreError> {
        self.load_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected load failure".into()));
        }
        let docs = self.docs.lock().expect("store poisoned");
        Ok(docs
            .get(&(user_id.to_string(), section_id.to_string()))
            .cloned())
    }

    fn save(
        &self,
        user_id: &str,
        section_id: &str,
        answers: &SectionAnswers,
    ) -> Result<(), StoreError> {
        self.save_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected save failure".into()));
        }
        let mut docs = self.docs.lock().expect("store poisoned");
        docs.insert(
            (user_id.to_string(), section_id.to_string()),
            answers.clone(),
        );
        Ok(())
    }
}
