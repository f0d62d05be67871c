use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;

/// Per-deck learned set and review counters. The learned set is append-only
/// from the review UI.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeckProgress {
    pub learned: BTreeSet<String>,
    pub pass_count: u32,
    pub fail_count: u32,
}

impl DeckProgress {
    pub fn reviews(&self) -> u32 {
        self.pass_count + self.fail_count
    }
}

/// All persisted per-deck progress, keyed by deck name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressData {
    pub schema_version: u32,
    pub decks: BTreeMap<String, DeckProgress>,
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            decks: BTreeMap::new(),
        }
    }
}

impl ProgressData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    pub fn deck_mut(&mut self, name: &str) -> &mut DeckProgress {
        self.decks.entry(name.to_string()).or_default()
    }

    pub fn learned(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.decks.get(name).map(|d| &d.learned)
    }

    /// Idempotent mark: returns true only on first insertion.
    #[allow(dead_code)] // Store-level entry point; the review flow inserts through the session
    pub fn mark_known(&mut self, deck: &str, word: &str) -> bool {
        self.deck_mut(deck).learned.insert(word.to_string())
    }

    pub fn words_learned(&self) -> usize {
        self.decks.values().map(|d| d.learned.len()).sum()
    }
}

/// Cross-deck totals and the daily practice streak.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileData {
    pub schema_version: u32,
    pub total_reviews: u32,
    pub streak_days: u32,
    pub best_streak: u32,
    pub last_practice_date: Option<String>,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            total_reviews: 0,
            streak_days: 0,
            best_streak: 0,
            last_practice_date: None,
        }
    }
}

impl ProfileData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    /// Count one review toward the totals and today's streak.
    pub fn record_review(&mut self, today: &str) {
        self.total_reviews += 1;
        if self.last_practice_date.as_deref() == Some(today) {
            return;
        }
        let continues = self.last_practice_date.as_deref().is_some_and(|last| {
            let parse = |s: &str| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
            match (parse(last), parse(today)) {
                (Some(a), Some(b)) => b.signed_duration_since(a).num_days() == 1,
                _ => false,
            }
        });
        self.streak_days = if continues { self.streak_days + 1 } else { 1 };
        self.best_streak = self.best_streak.max(self.streak_days);
        self.last_practice_date = Some(today.to_string());
    }
}
