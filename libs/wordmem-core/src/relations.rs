//! Word-to-word relation lookups.
//!
//! Pure and recomputed on demand; at a few thousand items a linear scan
//! is cheaper than maintaining an incremental index.

use std::collections::HashMap;

use crate::types::{ThemeCategory, VocabularyItem};

/// Lowercased word -> names of the themes listing it.
#[derive(Debug, Clone, Default)]
pub struct ThemeIndex {
    word_to_themes: HashMap<String, Vec<String>>,
}

impl ThemeIndex {
    pub fn build(themes: &[ThemeCategory]) -> Self {
        let mut word_to_themes: HashMap<String, Vec<String>> = HashMap::new();
        for theme in themes {
            for word in &theme.related_words {
                word_to_themes
                    .entry(word.to_lowercase())
                    .or_default()
                    .push(theme.theme.clone());
            }
        }
        Self { word_to_themes }
    }

    pub fn themes_for(&self, word: &str) -> Option<&[String]> {
        self.word_to_themes.get(&word.to_lowercase()).map(Vec::as_slice)
    }

    pub fn is_themed(&self, word: &str) -> bool {
        self.word_to_themes.contains_key(&word.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.word_to_themes.is_empty()
    }
}

/// The four relation groups shown for a target word. Disjoint: each
/// candidate lands in the first group it qualifies for, in the order the
/// fields are declared.
#[derive(Debug, Clone, Default)]
pub struct SemanticGroups {
    pub synonyms: Vec<VocabularyItem>,
    pub antonyms: Vec<VocabularyItem>,
    pub same_root: Vec<VocabularyItem>,
    pub same_part_of_speech: Vec<VocabularyItem>,
}

impl SemanticGroups {
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
            && self.antonyms.is_empty()
            && self.same_root.is_empty()
            && self.same_part_of_speech.is_empty()
    }
}

/// Compute the relation groups of `target` against the full item pool.
pub fn semantic_groups(target: &VocabularyItem, pool: &[VocabularyItem]) -> SemanticGroups {
    let mut groups = SemanticGroups::default();

    for candidate in pool {
        if candidate.word.eq_ignore_ascii_case(&target.word) {
            continue;
        }

        if contains_ignore_case(&target.synonyms, &candidate.word)
            || contains_ignore_case(&candidate.synonyms, &target.word)
        {
            groups.synonyms.push(candidate.clone());
        } else if contains_ignore_case(&target.antonyms, &candidate.word)
            || contains_ignore_case(&candidate.antonyms, &target.word)
        {
            groups.antonyms.push(candidate.clone());
        } else if target.root_word.is_some() && target.root_word == candidate.root_word {
            groups.same_root.push(candidate.clone());
        } else if target.part_of_speech.is_some()
            && target.part_of_speech == candidate.part_of_speech
        {
            groups.same_part_of_speech.push(candidate.clone());
        }
    }

    groups
}

/// Whether two items belong to the same semantic neighborhood: equal
/// surface form, shared root, overlapping synsets, or one listing the
/// other as a synonym.
pub fn is_semantically_related(a: &VocabularyItem, b: &VocabularyItem) -> bool {
    a.word.eq_ignore_ascii_case(&b.word)
        || (a.root_word.is_some() && a.root_word == b.root_word)
        || a.synsets.iter().any(|s| b.synsets.contains(s))
        || contains_ignore_case(&a.synonyms, &b.word)
        || contains_ignore_case(&b.synonyms, &a.word)
}

fn contains_ignore_case(list: &[String], word: &str) -> bool {
    list.iter().any(|entry| entry.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn item(word: &str) -> VocabularyItem {
        VocabularyItem::new(word, format!("definition of {word}"), DateTime::UNIX_EPOCH)
    }

    #[test]
    fn theme_index_keys_are_lowercased() {
        let themes = vec![
            ThemeCategory::new("nature", vec!["Tree".into(), "river".into()]),
            ThemeCategory::new("school", vec!["tree".into(), "desk".into()]),
        ];
        let index = ThemeIndex::build(&themes);

        assert!(index.is_themed("TREE"));
        assert_eq!(
            index.themes_for("tree").unwrap(),
            &["nature".to_string(), "school".to_string()]
        );
        assert!(!index.is_themed("cloud"));
    }

    #[test]
    fn groups_are_disjoint_with_synonym_precedence() {
        let mut target = item("happy");
        target.synonyms = vec!["glad".into()];
        target.root_word = Some("happ".into());
        target.part_of_speech = Some("adjective".into());

        // Qualifies as synonym, same root and same POS; must land only in
        // synonyms.
        let mut glad = item("glad");
        glad.root_word = Some("happ".into());
        glad.part_of_speech = Some("adjective".into());

        let mut sad = item("sad");
        sad.antonyms = vec!["happy".into()];
        sad.part_of_speech = Some("adjective".into());

        let mut merry = item("merry");
        merry.part_of_speech = Some("adjective".into());

        let groups = semantic_groups(&target, &[target.clone(), glad, sad, merry]);
        assert_eq!(groups.synonyms.len(), 1);
        assert_eq!(groups.synonyms[0].word, "glad");
        assert_eq!(groups.antonyms.len(), 1);
        assert_eq!(groups.antonyms[0].word, "sad");
        assert!(groups.same_root.is_empty());
        assert_eq!(groups.same_part_of_speech.len(), 1);
        assert_eq!(groups.same_part_of_speech[0].word, "merry");
    }

    #[test]
    fn missing_root_never_matches() {
        let target = item("run");
        let other = item("walk");
        let groups = semantic_groups(&target, &[other]);
        assert!(groups.is_empty());
    }

    #[test]
    fn synonym_containment_is_bidirectional() {
        let mut a = item("big");
        a.synonyms = vec!["large".into()];
        let b = item("large");
        assert!(is_semantically_related(&a, &b));
        assert!(is_semantically_related(&b, &a));
    }

    #[test]
    fn shared_synset_relates_items() {
        let mut a = item("car");
        a.synsets = vec!["vehicle.n.01".into()];
        let mut b = item("automobile");
        b.synsets = vec!["vehicle.n.01".into()];
        assert!(is_semantically_related(&a, &b));
    }
}
