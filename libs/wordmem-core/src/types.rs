//! Core types for the vocabulary review scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Recall quality reported after an exercise, on the SM-2 0-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// Complete blackout, no recollection at all.
    Blackout,
    /// Incorrect, but the answer felt familiar once revealed.
    Incorrect,
    /// Incorrect, yet the answer seemed easy to recall.
    AlmostRecalled,
    /// Correct with serious difficulty.
    Difficult,
    /// Correct after some hesitation.
    Hesitant,
    /// Perfect recall.
    Perfect,
}

impl Grade {
    /// Convert to the numeric SM-2 quality value (0-5).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Blackout => 0,
            Self::Incorrect => 1,
            Self::AlmostRecalled => 2,
            Self::Difficult => 3,
            Self::Hesitant => 4,
            Self::Perfect => 5,
        }
    }

    /// Create from a numeric quality value. Values outside 0-5 are rejected.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Blackout),
            1 => Some(Self::Incorrect),
            2 => Some(Self::AlmostRecalled),
            3 => Some(Self::Difficult),
            4 => Some(Self::Hesitant),
            5 => Some(Self::Perfect),
            _ => None,
        }
    }

    /// A grade below 3 counts as a lapse.
    pub fn is_lapse(self) -> bool {
        self.to_value() < 3
    }
}

impl TryFrom<u8> for Grade {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(SchedulerError::InvalidGrade { value })
    }
}

/// A multi-blank cloze exercise attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClozeTestEntry {
    pub cloze_sentence: String,
    pub cloze_sentence_translation: String,
    pub options: Vec<String>,
    pub blank_answers: Vec<String>,
}

/// A synonym-rewriting exercise attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SynonymReplacementEntry {
    pub original_sentence: String,
    pub original_translation: String,
    pub recommended_replacement_sentence: String,
}

/// A theme label with the words it groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeCategory {
    pub theme: String,
    pub related_words: Vec<String>,
}

impl ThemeCategory {
    pub fn new(theme: impl Into<String>, related_words: Vec<String>) -> Self {
        Self { theme: theme.into(), related_words }
    }
}

/// One memorized word or phrase, including its review state.
///
/// Field names serialize as camelCase with epoch-millisecond timestamps so
/// that persisted items round-trip the at-rest JSON shape unchanged.
/// Review-state fields are only ever rewritten by the SM-2 engine or an
/// explicit reschedule; all updates are copy-on-update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VocabularyItem {
    pub word: String,
    pub definition: String,
    pub example: Vec<String>,
    /// Sentences following the "English sentence (Chinese translation)"
    /// convention with the target word blanked out.
    pub fill_in_the_blank_examples: Vec<String>,
    pub cloze_test_examples: Vec<ClozeTestEntry>,
    pub synonym_replacement_examples: Vec<SynonymReplacementEntry>,
    pub related_words: Vec<String>,
    pub synsets: Vec<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub similar_words: Vec<String>,
    pub root_word: Option<String>,
    pub part_of_speech: Option<String>,
    /// IPA transcription, empty when never looked up.
    pub pronunciation: String,
    /// SM-2 easiness factor, never below 1.3.
    pub easiness_factor: f64,
    /// Days until the next scheduled review, at least 1.
    pub interval: u32,
    /// Consecutive successful repetitions since the last lapse.
    pub repetitions: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub next_review_date: DateTime<Utc>,
    /// Fill-in-blank practice is sampled on its own 7-day cooldown,
    /// independent of the main SM-2 schedule.
    pub fill_in_blank_review_count: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_fill_in_blank_review_date: DateTime<Utc>,
}

impl Default for VocabularyItem {
    fn default() -> Self {
        Self {
            word: String::new(),
            definition: String::new(),
            example: Vec::new(),
            fill_in_the_blank_examples: Vec::new(),
            cloze_test_examples: Vec::new(),
            synonym_replacement_examples: Vec::new(),
            related_words: Vec::new(),
            synsets: Vec::new(),
            synonyms: Vec::new(),
            antonyms: Vec::new(),
            similar_words: Vec::new(),
            root_word: None,
            part_of_speech: None,
            pronunciation: String::new(),
            easiness_factor: 2.5,
            interval: 1,
            repetitions: 0,
            next_review_date: DateTime::UNIX_EPOCH,
            fill_in_blank_review_count: 0,
            last_fill_in_blank_review_date: DateTime::UNIX_EPOCH,
        }
    }
}

impl VocabularyItem {
    /// Create a fresh item due immediately.
    pub fn new(word: impl Into<String>, definition: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
            next_review_date: now,
            ..Self::default()
        }
    }

    /// The unique store key: the surface form, lowercased.
    pub fn key(&self) -> String {
        self.word.to_lowercase()
    }

    pub fn has_cloze_tests(&self) -> bool {
        !self.cloze_test_examples.is_empty()
    }

    pub fn has_fill_in_blank_examples(&self) -> bool {
        !self.fill_in_the_blank_examples.is_empty()
    }

    pub fn has_synonym_replacements(&self) -> bool {
        !self.synonym_replacement_examples.is_empty()
    }

    /// Whether the item lists any semantic neighbors directly.
    pub fn has_semantic_neighbors(&self) -> bool {
        !self.synonyms.is_empty() || !self.antonyms.is_empty() || !self.similar_words.is_empty()
    }
}

/// The exercise modality a due item is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    ClozeTest,
    SentenceCompletion,
    SynonymReplacement,
    DefinitionQuiz,
    ThemeClassification,
    SemanticDrag,
    Flashcard,
}

impl ExerciseKind {
    /// Drain order between tiers: lower ranks first. The two modalities
    /// within a shared tier carry the same rank so input order is kept.
    pub fn tier_rank(self) -> u8 {
        match self {
            Self::ClozeTest => 0,
            Self::SentenceCompletion | Self::SynonymReplacement => 1,
            Self::DefinitionQuiz => 2,
            Self::ThemeClassification | Self::SemanticDrag => 3,
            Self::Flashcard => 4,
        }
    }

    pub fn is_advanced(self) -> bool {
        self != Self::Flashcard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn grade_round_trips_numeric_values() {
        for value in 0..=5u8 {
            let grade = Grade::from_value(value).unwrap();
            assert_eq!(grade.to_value(), value);
        }
    }

    #[test]
    fn grade_rejects_out_of_range() {
        assert_eq!(Grade::from_value(6), None);
        assert!(Grade::try_from(7).is_err());
    }

    #[test]
    fn lapse_threshold_sits_below_three() {
        assert!(Grade::AlmostRecalled.is_lapse());
        assert!(!Grade::Difficult.is_lapse());
    }

    #[test]
    fn item_deserializes_with_missing_review_fields() {
        let item: VocabularyItem =
            serde_json::from_str(r#"{"word":"Run","definition":"to move fast"}"#).unwrap();
        assert_eq!(item.easiness_factor, 2.5);
        assert_eq!(item.interval, 1);
        assert_eq!(item.repetitions, 0);
        assert_eq!(item.next_review_date, DateTime::UNIX_EPOCH);
        assert_eq!(item.key(), "run");
    }

    #[test]
    fn item_serializes_timestamps_as_epoch_millis() {
        let mut item = VocabularyItem::new("run", "to move fast", DateTime::UNIX_EPOCH);
        item.next_review_date = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["nextReviewDate"], 1_700_000_000_000i64);
        assert_eq!(json["fillInBlankReviewCount"], 0);
    }

    #[test]
    fn item_round_trips_through_json() {
        let mut item = VocabularyItem::new("garrulous", "excessively talkative", DateTime::UNIX_EPOCH);
        item.synonyms = vec!["talkative".into(), "loquacious".into()];
        item.root_word = Some("garrul".into());
        item.cloze_test_examples = vec![ClozeTestEntry {
            cloze_sentence: "He was _____ at dinner (他晚餐時喋喋不休)".into(),
            cloze_sentence_translation: "他晚餐時喋喋不休".into(),
            options: vec!["garrulous".into(), "taciturn".into()],
            blank_answers: vec!["garrulous".into()],
        }];
        let json = serde_json::to_string(&item).unwrap();
        let back: VocabularyItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn tier_ranks_order_advanced_before_plain() {
        assert!(ExerciseKind::ClozeTest.tier_rank() < ExerciseKind::SentenceCompletion.tier_rank());
        assert!(ExerciseKind::DefinitionQuiz.tier_rank() < ExerciseKind::SemanticDrag.tier_rank());
        assert!(ExerciseKind::SemanticDrag.tier_rank() < ExerciseKind::Flashcard.tier_rank());
        assert!(!ExerciseKind::Flashcard.is_advanced());
    }
}
