//! Review session driver.
//!
//! Wires the core session queue to persistence: the due set is computed
//! on a copy-on-read snapshot (a bulk import running mid-session cannot
//! corrupt the planned queue), one exercise is active at a time, and each
//! graded update is saved before the next dequeue, which serializes
//! writes per item key by construction. Dropping the session abandons the
//! queue; grades already persisted stay committed.

use chrono::{DateTime, Utc};
use wordmem_core::{
    plan_session, select_due, ExerciseAssignment, ExerciseOutcome, SessionQueue, SessionState,
    Sm2, ThemeIndex, VocabularyItem,
};

use crate::error::Result;
use crate::store::{ThemeStore, WordStore};

/// One day's review session against a word store.
pub struct ReviewSession<'a, S: WordStore> {
    store: &'a mut S,
    queue: SessionQueue,
    sm2: Sm2,
}

impl<'a, S: WordStore> ReviewSession<'a, S> {
    /// Snapshot the store, select the due set, triage it into tiers and
    /// load the queue.
    pub fn begin<T: ThemeStore>(
        store: &'a mut S,
        theme_store: &T,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let snapshot = store.load_all()?;
        let due = select_due(&snapshot, now);
        let themes = ThemeIndex::build(&theme_store.themes()?);

        let mut queue = SessionQueue::new();
        queue.load(plan_session(due, &themes));
        tracing::info!(state = ?queue.state(), "review session started");

        Ok(Self { store, queue, sm2: Sm2::default() })
    }

    /// The next exercise to run, or the one still awaiting its outcome.
    pub fn next_exercise(&mut self) -> Option<ExerciseAssignment> {
        self.queue.next_exercise()
    }

    /// Deliver an exercise outcome, persisting the updated item when the
    /// outcome carries one.
    pub fn complete_exercise(
        &mut self,
        outcome: ExerciseOutcome,
        now: DateTime<Utc>,
    ) -> Result<Option<VocabularyItem>> {
        let updated = self.queue.submit_outcome(outcome, &self.sm2, now)?;
        if let Some(item) = &updated {
            self.store.save_one(item)?;
            tracing::info!(
                word = %item.word,
                interval = item.interval,
                next_review = %item.next_review_date,
                "graded and saved"
            );
        }
        Ok(updated)
    }

    /// Inject a related item discovered mid-session. Returns whether it
    /// joined the queue.
    pub fn add_related(&mut self, item: VocabularyItem) -> bool {
        self.queue.enqueue_if_new(item)
    }

    pub fn state(&self) -> SessionState {
        self.queue.state()
    }

    pub fn is_complete(&self) -> bool {
        self.queue.state() == SessionState::Complete
    }
}
