//! Section runner: async glue between engine, store, and router.
//!
//! The runner drives one section visit end to end: hydrate from the store,
//! pass edits through, and on submit run the save -> acknowledge -> advance
//! protocol. Both suspension points (initial load, save) are fire-once and
//! non-overlapping; dropping the runner abandons the visit, and a save that
//! resolves after the host navigated away is simply discarded.

use std::time::Duration;

use crate::error::SubmitError;
use crate::events::Event;
use crate::section::{Section, SectionId};
use crate::storage::SectionStore;

use super::engine::{WizardEngine, WizardState, WizardTiming};

/// Navigation interface exposed by the engine to its host.
///
/// Invoked exactly once per successful visit, from the `Advancing` state.
/// `None` means the flow is complete (there is no next section).
pub trait Router {
    fn advance_to(&mut self, next: Option<SectionId>);
}

/// Drives one section visit against a store and a router.
pub struct SectionRunner<S, R> {
    engine: WizardEngine,
    store: S,
    router: R,
    user_id: Option<String>,
}

impl<S: SectionStore, R: Router> SectionRunner<S, R> {
    /// Create a runner and hydrate the section from the store.
    ///
    /// A store failure degrades to an empty section (the warning event is
    /// returned); a missing identity skips the load entirely and enters
    /// fresh. Advance will still be rejected until an identity exists.
    pub fn enter(
        section: Section,
        next_section: Option<SectionId>,
        timing: WizardTiming,
        store: S,
        router: R,
        user_id: Option<String>,
    ) -> (Self, Event) {
        let mut engine = WizardEngine::new_loading(section, next_section, timing);
        let event = match &user_id {
            Some(user) => match store.load(user, &engine.section().id) {
                Ok(doc) => engine.hydrate(doc.as_ref()),
                Err(e) => engine.load_failed(&e.to_string()),
            },
            None => engine.hydrate(None),
        };
        let event = event.unwrap_or_else(|| engine.snapshot());
        (
            Self {
                engine,
                store,
                router,
                user_id,
            },
            event,
        )
    }

    pub fn engine(&self) -> &WizardEngine {
        &self.engine
    }

    /// Edit access to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut WizardEngine {
        &mut self.engine
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Run the full save-then-advance protocol.
    ///
    /// Validation, identity and in-flight guards surface as `SubmitError`
    /// with no side effect. A store failure is not an `Err`: it lands the
    /// engine in `Error` and shows up as a `SaveFailed` event; the caller
    /// may call `submit` again to retry. On success the acknowledge delay
    /// runs to completion and the router receives the next section id.
    pub async fn submit(&mut self) -> Result<Vec<Event>, SubmitError> {
        let mut events = Vec::new();
        events.push(self.engine.submit(self.user_id.as_deref())?);

        let user = self.user_id.clone().expect("guarded by submit");
        let document = self.engine.document();
        let saved = self
            .store
            .save(&user, &self.engine.section().id, &document);

        let resolved = match saved {
            Ok(()) => self.engine.save_succeeded(),
            Err(e) => self.engine.save_failed(&e.to_string()),
        };
        if let Some(event) = resolved {
            events.push(event);
        }

        if self.engine.state() == WizardState::Acknowledged {
            loop {
                if let Some(event) = self.engine.tick() {
                    let advanced = matches!(event, Event::Advanced { .. });
                    events.push(event);
                    if advanced {
                        break;
                    }
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            let next = self.engine.next_section().cloned();
            self.router.advance_to(next);
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::section::Catalog;
    use crate::storage::{AnswerValue, MemoryStore, SectionAnswers};

    /// Records advance calls; shared so tests can inspect it while the
    /// runner holds its own reference.
    #[derive(Default)]
    struct RecordingRouter {
        calls: Mutex<Vec<Option<SectionId>>>,
    }

    impl RecordingRouter {
        fn calls(&self) -> Vec<Option<SectionId>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Router for &RecordingRouter {
        fn advance_to(&mut self, next: Option<SectionId>) {
            self.calls.lock().unwrap().push(next);
        }
    }

    type TestRunner<'a> = SectionRunner<&'a MemoryStore, &'a RecordingRouter>;

    fn runner<'a>(
        store: &'a MemoryStore,
        router: &'a RecordingRouter,
        user: Option<&str>,
    ) -> TestRunner<'a> {
        let catalog = Catalog::builtin();
        let section = catalog.by_id("identity").unwrap().clone();
        let next = catalog.next_after("identity");
        let (runner, _entered) = SectionRunner::enter(
            section,
            next,
            WizardTiming::immediate(),
            store,
            router,
            user.map(|u| u.to_string()),
        );
        runner
    }

    fn fill_identity(runner: &mut TestRunner<'_>) {
        let engine = runner.engine_mut();
        engine.set_text("story", "a story about who i am");
        engine.toggle("motivations", "Problem solving");
        engine.toggle("impact", "Data and analytics");
    }

    #[tokio::test]
    async fn submit_saves_once_then_advances_once() {
        let store = MemoryStore::new();
        let router = RecordingRouter::default();
        let mut runner = runner(&store, &router, Some("user-1"));
        fill_identity(&mut runner);

        let events = runner.submit().await.unwrap();
        assert!(matches!(events[0], Event::SaveStarted { .. }));
        assert!(matches!(events[1], Event::SaveAcknowledged { .. }));
        assert!(matches!(events.last(), Some(Event::Advanced { .. })));

        assert_eq!(store.save_count(), 1);
        assert_eq!(router.calls(), vec![Some("technical".to_string())]);

        let stored = store.load("user-1", "identity").unwrap().unwrap();
        assert_eq!(
            stored.get("story"),
            Some(&AnswerValue::Text("a story about who i am".into()))
        );
    }

    #[tokio::test]
    async fn invalid_submit_never_reaches_the_store() {
        let store = MemoryStore::new();
        let router = RecordingRouter::default();
        let mut runner = runner(&store, &router, Some("user-1"));

        let err = runner.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Validation { .. }));
        assert_eq!(store.save_count(), 0);
        assert!(router.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_identity_blocks_the_save() {
        let store = MemoryStore::new();
        let router = RecordingRouter::default();
        let mut runner = runner(&store, &router, None);
        fill_identity(&mut runner);

        let err = runner.submit().await.unwrap_err();
        assert_eq!(err, SubmitError::SessionMissing);
        assert_eq!(store.save_count(), 0);
        assert!(router.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_save_stays_put_and_retry_succeeds() {
        let store = MemoryStore::new();
        store.fail_saves(true);
        let router = RecordingRouter::default();
        let mut runner = runner(&store, &router, Some("user-1"));
        fill_identity(&mut runner);

        let events = runner.submit().await.unwrap();
        assert!(matches!(events.last(), Some(Event::SaveFailed { .. })));
        assert_eq!(runner.engine().state(), WizardState::Error);
        assert!(router.calls().is_empty());

        store.fail_saves(false);
        let events = runner.submit().await.unwrap();
        assert!(matches!(events.last(), Some(Event::Advanced { .. })));
        assert_eq!(store.save_count(), 2);
        assert_eq!(router.calls(), vec![Some("technical".to_string())]);
    }

    #[tokio::test]
    async fn enter_hydrates_existing_answers() {
        let store = MemoryStore::new();
        let mut doc = SectionAnswers::new();
        doc.insert("story", AnswerValue::Text("a previously saved story".into()));
        store.save("user-1", "identity", &doc).unwrap();

        let router = RecordingRouter::default();
        let runner = runner(&store, &router, Some("user-1"));
        assert!(runner.engine().completion_of("story").unwrap().complete);
    }

    #[tokio::test]
    async fn enter_degrades_on_load_failure() {
        let store = MemoryStore::new();
        store.fail_loads(true);
        let router = RecordingRouter::default();

        let catalog = Catalog::builtin();
        let section = catalog.by_id("identity").unwrap().clone();
        let (runner, event) = SectionRunner::enter(
            section,
            None,
            WizardTiming::immediate(),
            &store,
            &router,
            Some("user-1".to_string()),
        );
        assert!(matches!(event, Event::LoadDegraded { .. }));
        assert_eq!(runner.engine().state(), WizardState::Ready);
        assert_eq!(runner.engine().completed_count(), 1);
    }

    #[tokio::test]
    async fn load_then_save_round_trip_preserves_document() {
        let store = MemoryStore::new();
        let mut original = SectionAnswers::new();
        original.insert("story", AnswerValue::Text("a story about who i am".into()));
        original.insert(
            "motivations",
            AnswerValue::List(vec!["Problem solving".into(), "User impact".into()]),
        );
        original.insert("impact", AnswerValue::Text("Data and analytics".into()));
        original.insert("clarity", AnswerValue::Number(70));
        store.save("user-1", "identity", &original).unwrap();

        let router = RecordingRouter::default();
        let mut runner = runner(&store, &router, Some("user-1"));
        // Unmodified resubmission reproduces an equivalent document.
        runner.submit().await.unwrap();
        let stored = store.load("user-1", "identity").unwrap().unwrap();
        assert_eq!(stored, original);
    }
}
