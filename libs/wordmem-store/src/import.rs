//! Bulk import of item-shaped JSON records.
//!
//! The payload is parsed in full before anything is committed; a
//! malformed payload fails the whole import. Records missing review-state
//! fields are defaulted, and records without a pronunciation go through a
//! best-effort lookup whose failures never block the import.

use chrono::{DateTime, Utc};
use thiserror::Error;
use wordmem_core::{Sm2, VocabularyItem};

use crate::error::{Result, StoreError};
use crate::store::WordStore;

/// Failure of the external pronunciation service. Non-fatal by design.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct LookupError(pub String);

/// External IPA lookup collaborator. Synchronous and best-effort; the
/// import pipeline only counts failures, it never propagates them.
pub trait PronunciationLookup {
    fn lookup(&self, word: &str) -> std::result::Result<String, LookupError>;
}

/// Aggregate counts reported after an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub total: usize,
    pub with_pronunciation: usize,
    pub failed_pronunciation: usize,
}

/// Import a JSON array of item records into the store.
///
/// Records are upserted by key. A record that already carries a
/// pronunciation counts as a lookup success without calling the service.
pub fn import_words<S: WordStore, L: PronunciationLookup>(
    store: &mut S,
    lookup: &L,
    json: &str,
    now: DateTime<Utc>,
) -> Result<ImportReport> {
    let records: Vec<VocabularyItem> =
        serde_json::from_str(json).map_err(|err| StoreError::invalid_format(&err))?;

    let mut report = ImportReport { total: records.len(), ..ImportReport::default() };

    for mut item in records {
        normalize_defaults(&mut item, now);

        if item.pronunciation.trim().is_empty() {
            match lookup.lookup(&item.word) {
                Ok(ipa) if !ipa.trim().is_empty() => {
                    item.pronunciation = ipa;
                    report.with_pronunciation += 1;
                }
                Ok(_) => report.failed_pronunciation += 1,
                Err(err) => {
                    tracing::warn!(word = %item.word, %err, "pronunciation lookup failed");
                    report.failed_pronunciation += 1;
                }
            }
        } else {
            report.with_pronunciation += 1;
        }

        store.save_one(&item)?;
    }

    tracing::info!(
        total = report.total,
        with_pronunciation = report.with_pronunciation,
        failed = report.failed_pronunciation,
        "imported items"
    );
    Ok(report)
}

/// Fill in review-state fields an imported record left unset.
///
/// Zero-valued fields are what a field-absent record deserializes to in
/// the at-rest shape; genuine review state is never zero, so only unset
/// fields are touched.
pub fn normalize_defaults(item: &mut VocabularyItem, now: DateTime<Utc>) {
    if item.next_review_date == DateTime::UNIX_EPOCH {
        item.next_review_date = now;
    }
    if item.easiness_factor == 0.0 {
        item.easiness_factor = Sm2::default().initial_ease;
    }
    if item.interval == 0 {
        item.interval = 1;
    }
}
