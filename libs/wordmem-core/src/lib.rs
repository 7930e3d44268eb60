//! Core vocabulary review library shared by the store layer and any
//! front-end surface.
//!
//! Provides:
//! - The persisted vocabulary item model and review-state fields
//! - The SM-2 update engine and the wrong-answer reschedule override
//! - Due-set selection and interval-tier exercise routing
//! - The session queue state machine
//! - Theme and semantic relation lookups
//! - Definition-quiz distractor generation

pub mod error;
pub mod quiz;
pub mod relations;
pub mod scheduler;
pub mod session;
pub mod sm2;
pub mod types;

pub use error::{Result, SchedulerError};
pub use quiz::definition_quiz_options;
pub use relations::{is_semantically_related, semantic_groups, SemanticGroups, ThemeIndex};
pub use scheduler::{classify, plan_session, select_due, ExerciseAssignment, SessionPlan};
pub use session::{ExerciseOutcome, SessionQueue, SessionState};
pub use sm2::{reschedule_tomorrow, Sm2};
pub use types::{
    ClozeTestEntry, ExerciseKind, Grade, SynonymReplacementEntry, ThemeCategory, VocabularyItem,
};
