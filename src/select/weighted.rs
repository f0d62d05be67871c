use std::collections::BTreeSet;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::deck::Deck;
use crate::select::NextWord;

/// Difficulty-weighted sampling: harder words come up proportionally more
/// often. Difficulty 0 is treated as 1 so every word stays reachable.
pub struct WeightedPolicy {
    rng: SmallRng,
}

impl WeightedPolicy {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }

    fn weighted_pick(&mut self, deck: &Deck, skip: Option<usize>) -> Option<usize> {
        let weight = |i: usize| u64::from(deck.words[i].difficulty.max(1));
        let total: u64 = (0..deck.len())
            .filter(|&i| Some(i) != skip)
            .map(weight)
            .sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.rng.gen_range(0..total);
        for i in 0..deck.len() {
            if Some(i) == skip {
                continue;
            }
            let w = weight(i);
            if roll < w {
                return Some(i);
            }
            roll -= w;
        }
        None
    }
}

impl NextWord for WeightedPolicy {
    fn next_index(
        &mut self,
        deck: &Deck,
        _learned: &BTreeSet<String>,
        current: Option<usize>,
    ) -> Option<usize> {
        if deck.is_empty() {
            return None;
        }
        if deck.len() == 1 {
            return Some(0);
        }
        self.weighted_pick(deck, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Word;
    use rand::SeedableRng;

    fn deck_with_difficulties(difficulties: &[u32]) -> Deck {
        Deck {
            name: "test".to_string(),
            language: "en".to_string(),
            words: difficulties
                .iter()
                .enumerate()
                .map(|(i, &d)| Word {
                    word: format!("w{i}"),
                    difficulty: d,
                    frequency: 1,
                    definition: String::new(),
                    example: None,
                    language: "en".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_and_single_word_decks() {
        let mut policy = WeightedPolicy::new(SmallRng::seed_from_u64(3));
        let learned = BTreeSet::new();
        assert_eq!(
            policy.next_index(&deck_with_difficulties(&[]), &learned, None),
            None
        );
        assert_eq!(
            policy.next_index(&deck_with_difficulties(&[5]), &learned, Some(0)),
            Some(0)
        );
    }

    #[test]
    fn test_harder_words_drawn_more_often() {
        let mut policy = WeightedPolicy::new(SmallRng::seed_from_u64(9));
        let d = deck_with_difficulties(&[1, 10]);
        let learned = BTreeSet::new();

        let mut counts = [0usize; 2];
        for _ in 0..2000 {
            // No current index so both words are candidates every draw
            let i = policy.next_index(&d, &learned, None).unwrap();
            counts[i] += 1;
        }
        assert!(
            counts[1] > counts[0] * 3,
            "difficulty-10 word drawn {} vs {}",
            counts[1],
            counts[0]
        );
    }

    #[test]
    fn test_zero_difficulty_words_stay_reachable() {
        let mut policy = WeightedPolicy::new(SmallRng::seed_from_u64(11));
        let d = deck_with_difficulties(&[0, 0, 0]);
        let learned = BTreeSet::new();
        for _ in 0..20 {
            assert!(policy.next_index(&d, &learned, None).is_some());
        }
    }

    #[test]
    fn test_current_index_not_repeated() {
        let mut policy = WeightedPolicy::new(SmallRng::seed_from_u64(13));
        let d = deck_with_difficulties(&[1, 1, 1, 1]);
        let learned = BTreeSet::new();
        let mut cursor = Some(0);
        for _ in 0..100 {
            let next = policy.next_index(&d, &learned, cursor);
            assert_ne!(next, cursor);
            cursor = next;
        }
    }
}
