pub mod card;
pub mod deck_bar;
pub mod menu;
pub mod stats_panel;
