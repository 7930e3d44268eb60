//! Daily fill-in-blank candidate pool.
//!
//! Regenerated at most once per calendar day (dates compared with the
//! time of day stripped) and persisted next to the store files, so the
//! same pool is served for the rest of the day even across restarts.
//! Fill-in-blank practice runs on its own 7-day cooldown per item,
//! independent of the SM-2 schedule.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use wordmem_core::VocabularyItem;

use crate::error::{Result, StoreError};
use crate::store::WordStore;

const POOL_FILE: &str = "fill_in_blank_pool.json";

/// Maximum items in one day's pool.
pub const DAILY_POOL_CAP: usize = 10;

/// Days an item sits out after a fill-in-blank practice.
pub const FILL_IN_BLANK_COOLDOWN_DAYS: u64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedPool {
    generated_on: NaiveDate,
    words: Vec<String>,
}

/// Return today's fill-in-blank candidates, generating them if no pool
/// exists for the current calendar day.
///
/// Candidates must have fill-in-blank examples and must not have been
/// practiced in this mode within the cooldown window; up to
/// [`DAILY_POOL_CAP`] survive a shuffle. A pool persisted earlier today is
/// served as-is (keys no longer present in the store are dropped).
pub fn ensure_pool_for_today<S: WordStore, R: Rng + ?Sized>(
    store: &S,
    state_dir: &Path,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<VocabularyItem>> {
    let pool_path = state_dir.join(POOL_FILE);
    let today = now.date_naive();
    let items = store.load_all()?;

    if let Some(pool) = read_pool(&pool_path) {
        if pool.generated_on == today && !pool.words.is_empty() {
            tracing::debug!(size = pool.words.len(), "serving persisted daily pool");
            return Ok(resolve_keys(&items, &pool.words));
        }
    }

    let cutoff = today
        .checked_sub_days(Days::new(FILL_IN_BLANK_COOLDOWN_DAYS))
        .unwrap_or(today)
        .and_time(NaiveTime::MIN)
        .and_utc();

    let mut candidates: Vec<VocabularyItem> = items
        .into_iter()
        .filter(|item| {
            item.has_fill_in_blank_examples() && item.last_fill_in_blank_review_date < cutoff
        })
        .collect();
    candidates.shuffle(rng);
    candidates.truncate(DAILY_POOL_CAP);

    let persisted = PersistedPool {
        generated_on: today,
        words: candidates.iter().map(VocabularyItem::key).collect(),
    };
    let raw = serde_json::to_string(&persisted)
        .map_err(|err| StoreError::invalid_format(&err))?;
    fs::write(&pool_path, raw)?;

    tracing::info!(size = candidates.len(), date = %today, "generated daily fill-in-blank pool");
    Ok(candidates)
}

/// Record one fill-in-blank practice on an item, bumping its independent
/// counter and cooldown timestamp. Copy-on-update; the SM-2 fields stay
/// untouched.
pub fn record_fill_in_blank_review(item: &VocabularyItem, now: DateTime<Utc>) -> VocabularyItem {
    let mut next = item.clone();
    next.fill_in_blank_review_count = item.fill_in_blank_review_count + 1;
    next.last_fill_in_blank_review_date = now;
    next
}

fn read_pool(path: &Path) -> Option<PersistedPool> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(pool) => Some(pool),
        Err(err) => {
            // A corrupt pool file just forces a regeneration.
            tracing::warn!(%err, "discarding unreadable daily pool state");
            None
        }
    }
}

fn resolve_keys(items: &[VocabularyItem], keys: &[String]) -> Vec<VocabularyItem> {
    keys.iter()
        .filter_map(|key| items.iter().find(|item| &item.key() == key))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, WordStore};
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    fn blankable(word: &str, last_practiced: DateTime<Utc>) -> VocabularyItem {
        let mut item = VocabularyItem::new(word, format!("definition of {word}"), now());
        item.fill_in_the_blank_examples = vec![format!("A sentence with _____ (含 {word} 的句子)")];
        item.last_fill_in_blank_review_date = last_practiced;
        item
    }

    #[test]
    fn pool_respects_cooldown_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();

        store.save_one(&blankable("stale", now() - Duration::days(30))).unwrap();
        store.save_one(&blankable("recent", now() - Duration::days(2))).unwrap();
        let mut no_examples = VocabularyItem::new("bare", "no blanks", now());
        no_examples.last_fill_in_blank_review_date = now() - Duration::days(30);
        store.save_one(&no_examples).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let pool = ensure_pool_for_today(&store, dir.path(), now(), &mut rng).unwrap();
        let words: Vec<_> = pool.iter().map(|i| i.word.as_str()).collect();
        assert_eq!(words, vec!["stale"]);
    }

    #[test]
    fn pool_is_capped_at_ten() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        for n in 0..15 {
            store
                .save_one(&blankable(&format!("word{n}"), now() - Duration::days(30)))
                .unwrap();
        }

        let mut rng = StdRng::seed_from_u64(7);
        let pool = ensure_pool_for_today(&store, dir.path(), now(), &mut rng).unwrap();
        assert_eq!(pool.len(), DAILY_POOL_CAP);
    }

    #[test]
    fn same_day_reuses_the_persisted_pool() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        for n in 0..15 {
            store
                .save_one(&blankable(&format!("word{n}"), now() - Duration::days(30)))
                .unwrap();
        }

        let mut rng = StdRng::seed_from_u64(7);
        let first = ensure_pool_for_today(&store, dir.path(), now(), &mut rng).unwrap();
        // A different seed later the same day must not reshuffle.
        let mut other_rng = StdRng::seed_from_u64(99);
        let later = now() + Duration::hours(8);
        let second = ensure_pool_for_today(&store, dir.path(), later, &mut other_rng).unwrap();
        assert_eq!(
            first.iter().map(VocabularyItem::key).collect::<Vec<_>>(),
            second.iter().map(VocabularyItem::key).collect::<Vec<_>>()
        );
    }

    #[test]
    fn next_day_regenerates() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.save_one(&blankable("early", now() - Duration::days(30))).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        ensure_pool_for_today(&store, dir.path(), now(), &mut rng).unwrap();

        // The only candidate gets practiced; tomorrow it is cooling down.
        let practiced = record_fill_in_blank_review(
            &store.load_all().unwrap()[0],
            now(),
        );
        store.save_one(&practiced).unwrap();

        let tomorrow = now() + Duration::days(1);
        let pool = ensure_pool_for_today(&store, dir.path(), tomorrow, &mut rng).unwrap();
        assert!(pool.is_empty());
    }

    #[test]
    fn practice_bumps_only_the_independent_schedule() {
        let item = blankable("run", now() - Duration::days(30));
        let practiced = record_fill_in_blank_review(&item, now());
        assert_eq!(practiced.fill_in_blank_review_count, 1);
        assert_eq!(practiced.last_fill_in_blank_review_date, now());
        assert_eq!(practiced.interval, item.interval);
        assert_eq!(practiced.repetitions, item.repetitions);
        assert_eq!(practiced.next_review_date, item.next_review_date);
    }
}
