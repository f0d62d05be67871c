pub mod random;
pub mod unseen;
pub mod weighted;

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::deck::Deck;

pub use random::RandomPolicy;
pub use unseen::UnseenPolicy;
pub use weighted::WeightedPolicy;

/// Next-word selection policy. Given the deck, the learned set, and the
/// current cursor, pick the next index, or None when nothing is selectable.
///
/// Policies avoid returning the current index twice in a row whenever the
/// candidate pool has more than one entry.
pub trait NextWord {
    fn next_index(
        &mut self,
        deck: &Deck,
        learned: &BTreeSet<String>,
        current: Option<usize>,
    ) -> Option<usize>;
}

pub const POLICY_NAMES: &[&str] = &["random", "weighted", "unseen"];

/// Build a policy by config/CLI name, defaulting to weighted.
pub fn policy_from_name(name: &str) -> Box<dyn NextWord> {
    let rng = SmallRng::from_entropy();
    match name {
        "random" => Box::new(RandomPolicy::new(rng)),
        "unseen" => Box::new(UnseenPolicy::new(rng)),
        _ => Box::new(WeightedPolicy::new(rng)),
    }
}

/// Re-roll helper: pick from `candidates`, avoiding `current` when possible.
fn pick_avoiding_current(
    rng: &mut SmallRng,
    candidates: &[usize],
    current: Option<usize>,
) -> Option<usize> {
    use rand::Rng;

    if candidates.is_empty() {
        return None;
    }
    if candidates.len() == 1 {
        return Some(candidates[0]);
    }
    loop {
        let idx = candidates[rng.gen_range(0..candidates.len())];
        if Some(idx) != current {
            return Some(idx);
        }
    }
}
