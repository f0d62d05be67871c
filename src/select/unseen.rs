use std::collections::BTreeSet;

use rand::rngs::SmallRng;

use crate::deck::Deck;
use crate::select::{NextWord, pick_avoiding_current};

/// Uniform selection over words not yet marked known. Once the whole deck is
/// learned there is nothing left to select and the cursor returns to the
/// sentinel, which the review screen renders as deck complete.
pub struct UnseenPolicy {
    rng: SmallRng,
}

impl UnseenPolicy {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }
}

impl NextWord for UnseenPolicy {
    fn next_index(
        &mut self,
        deck: &Deck,
        learned: &BTreeSet<String>,
        current: Option<usize>,
    ) -> Option<usize> {
        let candidates: Vec<usize> = (0..deck.len())
            .filter(|&i| !learned.contains(&deck.words[i].word))
            .collect();
        pick_avoiding_current(&mut self.rng, &candidates, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Word;
    use rand::SeedableRng;

    fn deck(words: &[&str]) -> Deck {
        Deck {
            name: "test".to_string(),
            language: "en".to_string(),
            words: words
                .iter()
                .map(|w| Word {
                    word: w.to_string(),
                    difficulty: 1,
                    frequency: 1,
                    definition: String::new(),
                    example: None,
                    language: "en".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_learned_words_are_excluded() {
        let mut policy = UnseenPolicy::new(SmallRng::seed_from_u64(21));
        let d = deck(&["cat", "dog", "fish"]);
        let learned: BTreeSet<String> = ["cat", "fish"].iter().map(|s| s.to_string()).collect();
        for _ in 0..50 {
            assert_eq!(policy.next_index(&d, &learned, None), Some(1));
        }
    }

    #[test]
    fn test_fully_learned_deck_yields_sentinel() {
        let mut policy = UnseenPolicy::new(SmallRng::seed_from_u64(21));
        let d = deck(&["cat"]);
        let learned: BTreeSet<String> = ["cat".to_string()].into_iter().collect();
        assert_eq!(policy.next_index(&d, &learned, Some(0)), None);
    }

    #[test]
    fn test_sole_unseen_word_can_repeat() {
        let mut policy = UnseenPolicy::new(SmallRng::seed_from_u64(21));
        let d = deck(&["cat", "dog"]);
        let learned: BTreeSet<String> = ["dog".to_string()].into_iter().collect();
        // "cat" is both current and the only candidate left
        assert_eq!(policy.next_index(&d, &learned, Some(0)), Some(0));
    }
}
