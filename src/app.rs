use std::time::Instant;

use crate::config::Config;
use crate::deck::Deck;
use crate::deck::catalog::DeckCatalog;
use crate::input::Direction;
use crate::input::gesture::GestureTracker;
use crate::select::{NextWord, POLICY_NAMES, policy_from_name};
use crate::session::review::{Outcome, ReviewState};
use crate::store::json_store::JsonStore;
use crate::store::schema::{ProfileData, ProgressData};
use crate::ui::components::menu::{Menu, MenuItem};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Review,
    Stats,
    Settings,
}

pub struct App {
    pub screen: AppScreen,
    pub deck: Option<Deck>,
    pub review: Option<ReviewState>,
    pub gesture: GestureTracker,
    pub policy: Box<dyn NextWord>,
    pub menu: Menu<'static>,
    pub menu_error: Option<String>,
    pub theme: &'static Theme,
    pub config: Config,
    pub catalog: DeckCatalog,
    pub deck_sizes: Vec<(String, usize)>,
    pub progress: ProgressData,
    pub profile: ProfileData,
    pub store: Option<JsonStore>,
    pub should_quit: bool,
    pub settings_selected: usize,
}

impl App {
    pub fn new() -> Self {
        let mut config = Config::load().unwrap_or_default();
        config.normalize_policy();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let store = JsonStore::new().ok();
        let (progress, profile) = if let Some(ref s) = store {
            // load_progress returns None if the file exists but can't parse
            let progress = match s.load_progress() {
                Some(p) if !p.needs_reset() => p,
                _ => ProgressData::default(),
            };
            let profile = s.load_profile();
            let profile = if profile.needs_reset() {
                ProfileData::default()
            } else {
                profile
            };
            (progress, profile)
        } else {
            (ProgressData::default(), ProfileData::default())
        };

        let catalog = DeckCatalog::new();
        let deck_sizes: Vec<(String, usize)> = catalog
            .available()
            .into_iter()
            .map(|name| {
                let count = catalog.load(&name).map(|d| d.len()).unwrap_or(0);
                (name, count)
            })
            .collect();
        let menu = Menu::new(theme, menu_items(&deck_sizes));

        let policy = policy_from_name(&config.policy);

        let mut app = Self {
            screen: AppScreen::Menu,
            deck: None,
            review: None,
            gesture: GestureTracker::new(),
            policy,
            menu,
            menu_error: None,
            theme,
            config,
            catalog,
            deck_sizes,
            progress,
            profile,
            store,
            should_quit: false,
            settings_selected: 0,
        };
        app.sync_menu_selection();
        app
    }

    /// Point the menu cursor at the configured default deck, so Enter on the
    /// start screen opens it. Unknown names leave the selection alone.
    fn sync_menu_selection(&mut self) {
        let deck = &self.config.deck;
        if let Some(i) = self.menu.items.iter().position(|item| &item.label == deck) {
            self.menu.selected = i;
        }
    }

    /// Mount the review screen for a deck. The session always starts from the
    /// unset cursor, so the first word is chosen by one automatic advance.
    pub fn start_review(&mut self, name: &str) {
        match self.catalog.load(name) {
            Ok(deck) => {
                let mut review = ReviewState::new();
                let learned = self
                    .progress
                    .learned(&deck.name)
                    .cloned()
                    .unwrap_or_default();
                review.ensure_started(&deck, &learned, self.policy.as_mut(), Instant::now());
                self.deck = Some(deck);
                self.review = Some(review);
                self.gesture.cancel();
                self.menu_error = None;
                self.screen = AppScreen::Review;
            }
            Err(e) => {
                self.menu_error = Some(e.to_string());
            }
        }
    }

    /// Route one normalized direction into the active review session, then
    /// persist whatever it changed.
    pub fn apply_direction(&mut self, direction: Direction) {
        let Some(deck) = self.deck.as_ref() else {
            return;
        };
        let Some(review) = self.review.as_mut() else {
            return;
        };

        let deck_progress = self.progress.decks.entry(deck.name.clone()).or_default();
        let outcome = review.apply(
            direction,
            deck,
            &mut deck_progress.learned,
            self.policy.as_mut(),
            Instant::now(),
        );

        match outcome {
            Some(Outcome::Pass { .. }) => {
                deck_progress.pass_count += 1;
                let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
                self.profile.record_review(&today);
                self.save_data();
            }
            Some(Outcome::Fail) => {
                deck_progress.fail_count += 1;
                let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
                self.profile.record_review(&today);
                self.save_data();
            }
            Some(Outcome::Revealed) | Some(Outcome::Hidden) | None => {}
        }
    }

    /// Tick from the event loop; drives the flash clear deadline.
    pub fn tick(&mut self, now: Instant) {
        if let Some(ref mut review) = self.review {
            review.tick(now);
        }
    }

    fn save_data(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_progress(&self.progress);
            let _ = store.save_profile(&self.profile);
        }
    }

    /// Unmount the review screen: session state is discarded, learned words
    /// stay in the store.
    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        self.deck = None;
        self.review = None;
        self.gesture.cancel();
    }

    pub fn go_to_stats(&mut self) {
        self.screen = AppScreen::Stats;
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn leave_settings(&mut self) {
        self.config.normalize_policy();
        self.policy = policy_from_name(&self.config.policy);
        let _ = self.config.save();
        self.sync_menu_selection();
        self.go_to_menu();
    }

    pub fn settings_cycle_forward(&mut self) {
        self.settings_cycle(1);
    }

    pub fn settings_cycle_backward(&mut self) {
        self.settings_cycle(-1);
    }

    fn settings_cycle(&mut self, step: isize) {
        match self.settings_selected {
            0 => {
                let themes = Theme::available_themes();
                self.config.theme = cycle(&themes, &self.config.theme, step);
                if let Some(new_theme) = Theme::load(&self.config.theme) {
                    let theme: &'static Theme = Box::leak(Box::new(new_theme));
                    self.theme = theme;
                    self.menu.theme = theme;
                }
            }
            1 => {
                let names: Vec<String> =
                    POLICY_NAMES.iter().map(|s| s.to_string()).collect();
                self.config.policy = cycle(&names, &self.config.policy, step);
            }
            2 => {
                let decks: Vec<String> =
                    self.deck_sizes.iter().map(|(n, _)| n.clone()).collect();
                self.config.deck = cycle(&decks, &self.config.deck, step);
            }
            _ => {}
        }
    }
}

fn menu_items(deck_sizes: &[(String, usize)]) -> Vec<MenuItem> {
    deck_sizes
        .iter()
        .enumerate()
        .map(|(i, (name, count))| MenuItem {
            key: (i + 1).to_string(),
            label: name.clone(),
            description: format!("{count} words"),
        })
        .collect()
}

fn cycle(options: &[String], current: &str, step: isize) -> String {
    if options.is_empty() {
        return current.to_string();
    }
    let len = options.len() as isize;
    let idx = options
        .iter()
        .position(|o| o == current)
        .map_or(0, |i| (i as isize + step).rem_euclid(len) as usize);
    options[idx].clone()
}
