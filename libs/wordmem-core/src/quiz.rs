//! Multiple-choice option generation for the definition quiz.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::VocabularyItem;

/// Number of options a definition quiz presents.
pub const OPTION_COUNT: usize = 4;

/// Build the option list for a definition quiz on `item`.
///
/// The correct definition is always present. Up to two distractors come
/// from the definitions of the item's listed similar words; the rest is
/// backfilled with random non-blank, non-duplicate definitions from the
/// pool until four options exist (fewer if the pool runs dry). The final
/// order is shuffled.
pub fn definition_quiz_options<R: Rng + ?Sized>(
    item: &VocabularyItem,
    pool: &HashMap<String, VocabularyItem>,
    rng: &mut R,
) -> Vec<String> {
    let mut options = vec![item.definition.clone()];

    let mut similar_definitions: Vec<String> = item
        .similar_words
        .iter()
        .filter_map(|word| pool.get(&word.to_lowercase()))
        .map(|similar| similar.definition.clone())
        .filter(|definition| !definition.trim().is_empty() && !options.contains(definition))
        .collect();
    similar_definitions.shuffle(rng);
    for definition in similar_definitions.into_iter().take(2) {
        if !options.contains(&definition) {
            options.push(definition);
        }
    }

    let mut fillers: Vec<String> = pool
        .values()
        .map(|candidate| candidate.definition.clone())
        .filter(|definition| !definition.trim().is_empty() && !options.contains(definition))
        .collect();
    fillers.shuffle(rng);

    let mut filler = fillers.into_iter();
    while options.len() < OPTION_COUNT {
        match filler.next() {
            Some(definition) if !options.contains(&definition) => options.push(definition),
            Some(_) => continue,
            None => break,
        }
    }

    options.shuffle(rng);
    options
}
