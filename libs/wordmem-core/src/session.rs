//! Session queue state machine.
//!
//! One review session drains the advanced-tier queue, then the plain
//! flashcard queue. Exercises run externally and take arbitrarily long;
//! the queue suspends on the in-flight exercise until an outcome event is
//! delivered back via [`SessionQueue::submit_outcome`]. Related words
//! discovered mid-session can be injected with
//! [`SessionQueue::enqueue_if_new`], which may revive a completed session.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};

use crate::error::{Result, SchedulerError};
use crate::scheduler::{ExerciseAssignment, SessionPlan};
use crate::sm2::{reschedule_tomorrow, Sm2};
use crate::types::{ExerciseKind, Grade, VocabularyItem};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    DrainingAdvanced,
    DrainingPlain,
    Complete,
}

/// The event an exercise delivers when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseOutcome {
    /// The user graded their recall.
    Graded(Grade),
    /// The answer was marked wrong: the SM-2 update runs with the given
    /// grade, then the next review is forced to tomorrow.
    Missed(Grade),
    /// The user backed out without grading; no state update, the session
    /// still advances.
    Cancelled,
}

/// Ordered, mutable work queue for one review session.
#[derive(Debug, Default)]
pub struct SessionQueue {
    advanced: VecDeque<ExerciseAssignment>,
    plain: VecDeque<VocabularyItem>,
    shown: HashSet<String>,
    in_flight: Option<ExerciseAssignment>,
    loaded: bool,
}

impl SessionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the triaged plan and leave the loading state.
    pub fn load(&mut self, plan: SessionPlan) {
        self.advanced = plan.advanced.into();
        self.plain = plan.plain.into();
        self.shown = plan.shown;
        self.loaded = true;
    }

    pub fn state(&self) -> SessionState {
        if !self.loaded {
            SessionState::Loading
        } else if !self.advanced.is_empty()
            || matches!(&self.in_flight, Some(a) if a.kind.is_advanced())
        {
            SessionState::DrainingAdvanced
        } else if !self.plain.is_empty() || self.in_flight.is_some() {
            SessionState::DrainingPlain
        } else {
            SessionState::Complete
        }
    }

    pub fn is_empty(&self) -> bool {
        self.advanced.is_empty() && self.plain.is_empty() && self.in_flight.is_none()
    }

    /// Bind the next exercise as current and hand it out.
    ///
    /// While an exercise is awaiting its outcome this re-delivers the same
    /// assignment instead of advancing. Returns `None` once the session is
    /// drained (or before it is loaded).
    pub fn next_exercise(&mut self) -> Option<ExerciseAssignment> {
        if !self.loaded {
            return None;
        }
        if let Some(current) = &self.in_flight {
            return Some(current.clone());
        }

        let next = self.advanced.pop_front().or_else(|| {
            self.plain
                .pop_front()
                .map(|item| ExerciseAssignment { item, kind: ExerciseKind::Flashcard })
        })?;
        self.in_flight = Some(next.clone());
        Some(next)
    }

    /// Deliver the outcome of the in-flight exercise.
    ///
    /// Returns the updated item the caller must persist, or `None` when the
    /// exercise was cancelled (the item is left untouched and the session
    /// advances regardless).
    pub fn submit_outcome(
        &mut self,
        outcome: ExerciseOutcome,
        sm2: &Sm2,
        now: DateTime<Utc>,
    ) -> Result<Option<VocabularyItem>> {
        let current = self.in_flight.take().ok_or(SchedulerError::NoExerciseInFlight)?;

        let updated = match outcome {
            ExerciseOutcome::Graded(grade) => Some(sm2.review(&current.item, grade, now)),
            ExerciseOutcome::Missed(grade) => {
                let reviewed = sm2.review(&current.item, grade, now);
                Some(reschedule_tomorrow(&reviewed, now))
            }
            ExerciseOutcome::Cancelled => {
                tracing::debug!(word = %current.item.word, "exercise cancelled, no update");
                None
            }
        };

        Ok(updated)
    }

    /// Queue a newly-discovered related item unless it was already part of
    /// this session. Returns whether it was enqueued.
    pub fn enqueue_if_new(&mut self, item: VocabularyItem) -> bool {
        if !self.shown.insert(item.key()) {
            return false;
        }
        tracing::debug!(word = %item.word, "related item joined the session");
        self.plain.push_back(item);
        true
    }
}
