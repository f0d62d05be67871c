use std::collections::BTreeSet;
use std::time::Instant;

use crate::deck::Deck;
use crate::input::Direction;
use crate::select::NextWord;
use crate::session::flash::{Status, StatusFlash};

/// What a routed direction did, for the caller to persist and count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Revealed,
    Hidden,
    Pass { word: String, newly_learned: bool },
    Fail,
}

/// Per-deck review session: the word cursor plus the transient display flags.
/// Created when the review screen mounts, dropped when it unmounts; only the
/// learned set outlives it.
pub struct ReviewState {
    pub cursor: Option<usize>,
    pub show_details: bool,
    pub flash: StatusFlash,
    initialized: bool,
}

impl ReviewState {
    pub fn new() -> Self {
        Self {
            cursor: None,
            show_details: false,
            flash: StatusFlash::default(),
            initialized: false,
        }
    }

    /// Complete initialization: if the cursor is still unset, run exactly one
    /// automatic advance so a starting word is on screen before any input.
    pub fn ensure_started(
        &mut self,
        deck: &Deck,
        learned: &BTreeSet<String>,
        policy: &mut dyn NextWord,
        now: Instant,
    ) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        if self.cursor.is_none() {
            self.advance(deck, learned, policy, now);
        }
    }

    /// Route a normalized direction. Up/Down toggle details; Right marks the
    /// current word known and advances with a Pass flash; Left advances with a
    /// Fail flash and no learning credit. Right and Left both require a word
    /// under the cursor, so a word-less screen yields no outcome to record.
    pub fn apply(
        &mut self,
        direction: Direction,
        deck: &Deck,
        learned: &mut BTreeSet<String>,
        policy: &mut dyn NextWord,
        now: Instant,
    ) -> Option<Outcome> {
        match direction {
            Direction::Up => {
                self.show_details = true;
                Some(Outcome::Revealed)
            }
            Direction::Down => {
                self.show_details = false;
                Some(Outcome::Hidden)
            }
            Direction::Right => {
                let word = deck.word_at(self.cursor)?.word.clone();
                let newly_learned = learned.insert(word.clone());
                self.flash.set(Status::Pass);
                self.advance(deck, learned, policy, now);
                Some(Outcome::Pass { word, newly_learned })
            }
            Direction::Left => {
                deck.word_at(self.cursor)?;
                self.flash.set(Status::Fail);
                self.advance(deck, learned, policy, now);
                Some(Outcome::Fail)
            }
        }
    }

    /// Move to the next word and reset transient display state. Resets happen
    /// unconditionally, so calling this in any prior state is safe.
    fn advance(
        &mut self,
        deck: &Deck,
        learned: &BTreeSet<String>,
        policy: &mut dyn NextWord,
        now: Instant,
    ) {
        self.cursor = policy.next_index(deck, learned, self.cursor);
        self.show_details = false;
        self.flash.rearm(now);
    }

    /// Drive the flash deadline from the event loop tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.flash.tick(now)
    }
}

impl Default for ReviewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Word;
    use crate::session::flash::CLEAR_AFTER;

    /// Deterministic policy for tests: always the next index in deck order.
    struct Sequential;

    impl NextWord for Sequential {
        fn next_index(
            &mut self,
            deck: &Deck,
            _learned: &BTreeSet<String>,
            current: Option<usize>,
        ) -> Option<usize> {
            if deck.is_empty() {
                return None;
            }
            Some(current.map_or(0, |i| (i + 1) % deck.len()))
        }
    }

    fn deck(words: &[&str]) -> Deck {
        Deck {
            name: "test".to_string(),
            language: "en".to_string(),
            words: words
                .iter()
                .map(|w| Word {
                    word: w.to_string(),
                    difficulty: 1,
                    frequency: 10,
                    definition: format!("definition of {w}"),
                    example: Some(format!("example with {w}")),
                    language: "en".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_init_runs_exactly_one_automatic_advance() {
        let deck = deck(&["cat", "dog"]);
        let learned = BTreeSet::new();
        let mut policy = Sequential;
        let mut state = ReviewState::new();
        assert_eq!(state.cursor, None);

        let now = Instant::now();
        state.ensure_started(&deck, &learned, &mut policy, now);
        assert_eq!(state.cursor, Some(0));

        // Idempotent: a second call does not advance again
        state.ensure_started(&deck, &learned, &mut policy, now);
        assert_eq!(state.cursor, Some(0));
    }

    #[test]
    fn test_up_reveals_and_down_hides_details() {
        let deck = deck(&["cat"]);
        let mut learned = BTreeSet::new();
        let mut policy = Sequential;
        let mut state = ReviewState::new();
        let now = Instant::now();
        state.ensure_started(&deck, &learned, &mut policy, now);

        let out = state.apply(Direction::Up, &deck, &mut learned, &mut policy, now);
        assert_eq!(out, Some(Outcome::Revealed));
        assert!(state.show_details);

        let out = state.apply(Direction::Down, &deck, &mut learned, &mut policy, now);
        assert_eq!(out, Some(Outcome::Hidden));
        assert!(!state.show_details);
    }

    #[test]
    fn test_right_marks_known_flashes_pass_and_advances() {
        let deck = deck(&["cat", "dog"]);
        let mut learned = BTreeSet::new();
        let mut policy = Sequential;
        let mut state = ReviewState::new();
        let now = Instant::now();
        state.ensure_started(&deck, &learned, &mut policy, now);

        let out = state.apply(Direction::Right, &deck, &mut learned, &mut policy, now);
        assert_eq!(
            out,
            Some(Outcome::Pass {
                word: "cat".to_string(),
                newly_learned: true
            })
        );
        assert!(learned.contains("cat"));
        assert_eq!(state.cursor, Some(1));
        assert_eq!(state.flash.status(), Some(Status::Pass));
    }

    #[test]
    fn test_left_flashes_fail_and_advances_without_credit() {
        let deck = deck(&["cat", "dog"]);
        let mut learned = BTreeSet::new();
        let mut policy = Sequential;
        let mut state = ReviewState::new();
        let now = Instant::now();
        state.ensure_started(&deck, &learned, &mut policy, now);

        let out = state.apply(Direction::Left, &deck, &mut learned, &mut policy, now);
        assert_eq!(out, Some(Outcome::Fail));
        assert!(learned.is_empty());
        assert_eq!(state.cursor, Some(1));
        assert_eq!(state.flash.status(), Some(Status::Fail));
    }

    #[test]
    fn test_second_mark_of_same_word_is_not_newly_learned() {
        let deck = deck(&["cat"]);
        let mut learned = BTreeSet::new();
        let mut policy = Sequential;
        let mut state = ReviewState::new();
        let now = Instant::now();
        state.ensure_started(&deck, &learned, &mut policy, now);

        state.apply(Direction::Right, &deck, &mut learned, &mut policy, now);
        let out = state.apply(Direction::Right, &deck, &mut learned, &mut policy, now);
        assert_eq!(
            out,
            Some(Outcome::Pass {
                word: "cat".to_string(),
                newly_learned: false
            })
        );
        assert_eq!(learned.len(), 1);
    }

    #[test]
    fn test_advance_resets_details_and_flash_clears_after_delay() {
        let deck = deck(&["cat", "dog"]);
        let mut learned = BTreeSet::new();
        let mut policy = Sequential;
        let mut state = ReviewState::new();
        let now = Instant::now();
        state.ensure_started(&deck, &learned, &mut policy, now);

        state.apply(Direction::Up, &deck, &mut learned, &mut policy, now);
        assert!(state.show_details);

        state.apply(Direction::Right, &deck, &mut learned, &mut policy, now);
        assert!(!state.show_details);
        assert_eq!(state.flash.status(), Some(Status::Pass));

        assert!(state.tick(now + CLEAR_AFTER));
        assert_eq!(state.flash.status(), None);
    }

    #[test]
    fn test_empty_deck_is_safe() {
        let deck = deck(&[]);
        let mut learned = BTreeSet::new();
        let mut policy = Sequential;
        let mut state = ReviewState::new();
        let now = Instant::now();
        state.ensure_started(&deck, &learned, &mut policy, now);
        assert_eq!(state.cursor, None);

        // Neither direction has a word to act on, so neither yields an outcome
        let out = state.apply(Direction::Right, &deck, &mut learned, &mut policy, now);
        assert_eq!(out, None);
        let out = state.apply(Direction::Left, &deck, &mut learned, &mut policy, now);
        assert_eq!(out, None);
        assert!(learned.is_empty());
        assert_eq!(state.flash.status(), None);
        assert_eq!(state.cursor, None);
    }

    /// Policy that never yields a word, mirroring the unseen policy once the
    /// whole deck is learned.
    struct Exhausted;

    impl NextWord for Exhausted {
        fn next_index(
            &mut self,
            _deck: &Deck,
            _learned: &BTreeSet<String>,
            _current: Option<usize>,
        ) -> Option<usize> {
            None
        }
    }

    #[test]
    fn test_completed_deck_screen_takes_no_review_input() {
        let deck = deck(&["cat"]);
        let mut learned = BTreeSet::from(["cat".to_string()]);
        let mut policy = Exhausted;
        let mut state = ReviewState::new();
        let now = Instant::now();
        state.ensure_started(&deck, &learned, &mut policy, now);
        assert_eq!(state.cursor, None);

        let out = state.apply(Direction::Left, &deck, &mut learned, &mut policy, now);
        assert_eq!(out, None);
        let out = state.apply(Direction::Right, &deck, &mut learned, &mut policy, now);
        assert_eq!(out, None);
        assert_eq!(state.flash.status(), None);
    }
}
