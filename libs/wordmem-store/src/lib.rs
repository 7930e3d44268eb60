//! Persistence and session driving for the vocabulary scheduler.
//!
//! Builds on `wordmem-core`: a JSON file store for items and themes, a
//! bulk import pipeline with best-effort pronunciation lookup, the daily
//! fill-in-blank candidate pool and a review session driver that persists
//! every graded update as it happens.

pub mod daily;
pub mod error;
pub mod import;
pub mod session;
pub mod store;

pub use daily::{
    ensure_pool_for_today, record_fill_in_blank_review, DAILY_POOL_CAP,
    FILL_IN_BLANK_COOLDOWN_DAYS,
};
pub use error::{Result, StoreError};
pub use import::{import_words, ImportReport, LookupError, PronunciationLookup};
pub use session::ReviewSession;
pub use store::{default_themes, JsonFileStore, ThemeStore, WordStore};
