use std::collections::BTreeSet;

use rand::rngs::SmallRng;

use crate::deck::Deck;
use crate::select::{NextWord, pick_avoiding_current};

/// Uniform selection over the whole deck.
pub struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }
}

impl NextWord for RandomPolicy {
    fn next_index(
        &mut self,
        deck: &Deck,
        _learned: &BTreeSet<String>,
        current: Option<usize>,
    ) -> Option<usize> {
        let candidates: Vec<usize> = (0..deck.len()).collect();
        pick_avoiding_current(&mut self.rng, &candidates, current)
    }
}
