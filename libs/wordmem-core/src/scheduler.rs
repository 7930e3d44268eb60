//! Due-set selection and exercise routing.
//!
//! The classifier is an ordered list of tier rules evaluated top-down;
//! the first rule that both matches the interval band and finds the
//! content its exercise needs wins. An item that qualifies numerically
//! but lacks content falls through to the plain flashcard tier instead
//! of being dropped.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::relations::ThemeIndex;
use crate::types::{ExerciseKind, VocabularyItem};

/// Return the items whose next review timestamp has elapsed.
///
/// Plain O(n) scan over a cloned snapshot; callers may mutate or persist
/// the originals while a session works on the copies.
pub fn select_due(items: &[VocabularyItem], now: DateTime<Utc>) -> Vec<VocabularyItem> {
    items
        .iter()
        .filter(|item| item.next_review_date <= now)
        .cloned()
        .collect()
}

type TierRule = fn(&VocabularyItem, &ThemeIndex) -> Option<ExerciseKind>;

/// Tier priority, top-down. First match wins.
const TIER_RULES: &[TierRule] = &[cloze_tier, completion_tier, definition_tier, association_tier];

fn cloze_tier(item: &VocabularyItem, _themes: &ThemeIndex) -> Option<ExerciseKind> {
    (item.interval >= 40 && item.has_cloze_tests()).then_some(ExerciseKind::ClozeTest)
}

fn completion_tier(item: &VocabularyItem, _themes: &ThemeIndex) -> Option<ExerciseKind> {
    if !(20..=39).contains(&item.interval) {
        return None;
    }
    if item.has_fill_in_blank_examples() {
        Some(ExerciseKind::SentenceCompletion)
    } else if item.has_synonym_replacements() {
        Some(ExerciseKind::SynonymReplacement)
    } else {
        None
    }
}

fn definition_tier(item: &VocabularyItem, _themes: &ThemeIndex) -> Option<ExerciseKind> {
    ((10..=19).contains(&item.interval) && !item.definition.trim().is_empty())
        .then_some(ExerciseKind::DefinitionQuiz)
}

fn association_tier(item: &VocabularyItem, themes: &ThemeIndex) -> Option<ExerciseKind> {
    if !(5..=9).contains(&item.interval) {
        return None;
    }
    if themes.is_themed(&item.word) {
        Some(ExerciseKind::ThemeClassification)
    } else if item.has_semantic_neighbors() {
        Some(ExerciseKind::SemanticDrag)
    } else {
        None
    }
}

/// Decide which exercise a due item is routed to.
pub fn classify(item: &VocabularyItem, themes: &ThemeIndex) -> ExerciseKind {
    let kind = TIER_RULES
        .iter()
        .find_map(|rule| rule(item, themes))
        .unwrap_or(ExerciseKind::Flashcard);
    tracing::debug!(word = %item.word, interval = item.interval, ?kind, "classified due item");
    kind
}

/// A due item bound to the exercise it will run as.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseAssignment {
    pub item: VocabularyItem,
    pub kind: ExerciseKind,
}

/// The triaged work for one review session.
#[derive(Debug, Clone, Default)]
pub struct SessionPlan {
    /// Advanced-tier exercises, ordered cloze > completion/synonym >
    /// definition quiz > theme/semantic, stable within each tier.
    pub advanced: Vec<ExerciseAssignment>,
    /// Plain flashcard reviews, in input order.
    pub plain: Vec<VocabularyItem>,
    /// Lowercased keys of every item placed in either queue.
    pub shown: HashSet<String>,
}

/// Partition a due set into the advanced-tier queue and the plain queue,
/// dropping duplicate keys.
pub fn plan_session(due: Vec<VocabularyItem>, themes: &ThemeIndex) -> SessionPlan {
    let mut plan = SessionPlan::default();

    for item in due {
        if !plan.shown.insert(item.key()) {
            continue;
        }
        match classify(&item, themes) {
            ExerciseKind::Flashcard => plan.plain.push(item),
            kind => plan.advanced.push(ExerciseAssignment { item, kind }),
        }
    }

    plan.advanced
        .sort_by_key(|assignment| assignment.kind.tier_rank());
    tracing::debug!(
        advanced = plan.advanced.len(),
        plain = plan.plain.len(),
        "planned review session"
    );
    plan
}
