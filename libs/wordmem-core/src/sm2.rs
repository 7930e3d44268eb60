//! SM-2 spaced repetition update engine.
//!
//! A deterministic, pure mapping from (item state, recall grade) to a new
//! item state. Only review-state fields change; content fields are copied
//! through untouched.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::types::{Grade, VocabularyItem};

/// SM-2 engine with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self { initial_ease: 2.5, minimum_ease: 1.3 }
    }
}

impl Sm2 {
    /// Apply one graded review and return the rescheduled item.
    ///
    /// A grade below 3 is a lapse: repetitions reset to 0 and the interval
    /// drops back to 1 day. Otherwise the interval progresses 1 -> 6 ->
    /// floor(previous * EF), with the EF taken before its own update.
    /// The easiness update runs on every call and is floored at
    /// `minimum_ease`.
    pub fn review(&self, item: &VocabularyItem, grade: Grade, now: DateTime<Utc>) -> VocabularyItem {
        let mut next = item.clone();

        if grade.is_lapse() {
            next.repetitions = 0;
            next.interval = 1;
        } else {
            next.repetitions = item.repetitions + 1;
            next.interval = match next.repetitions {
                1 => 1,
                2 => 6,
                _ => (item.interval as f64 * item.easiness_factor).floor() as u32,
            };
        }

        let penalty = f64::from(5 - grade.to_value());
        let ease = item.easiness_factor + 0.1 - penalty * (0.08 + penalty * 0.02);
        next.easiness_factor = ease.max(self.minimum_ease);

        next.next_review_date = now + Duration::days(i64::from(next.interval));
        next
    }
}

/// Force an item back to tomorrow regardless of its SM-2 schedule.
///
/// Exercise modes call this when an answer was wrong, guaranteeing
/// short-term re-exposure. "Tomorrow" is the next calendar day at the
/// stripped-time baseline (midnight), layered on top of whatever the
/// engine computed.
pub fn reschedule_tomorrow(item: &VocabularyItem, now: DateTime<Utc>) -> VocabularyItem {
    let mut next = item.clone();
    let tomorrow = (now + Duration::days(1)).date_naive();
    next.next_review_date = tomorrow.and_time(NaiveTime::MIN).and_utc();
    next
}
