use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::store::schema::{ProfileData, ProgressData};
use crate::ui::components::deck_bar::DeckBar;
use crate::ui::theme::Theme;

/// Per-deck progress overview plus profile totals.
pub struct StatsPanel<'a> {
    decks: &'a [(String, usize)], // (name, word count)
    progress: &'a ProgressData,
    profile: &'a ProfileData,
    theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn new(
        decks: &'a [(String, usize)],
        progress: &'a ProgressData,
        profile: &'a ProfileData,
        theme: &'a Theme,
    ) -> Self {
        Self {
            decks,
            progress,
            profile,
            theme,
        }
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Progress ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut constraints: Vec<Constraint> = vec![Constraint::Length(4)];
        constraints.extend(self.decks.iter().map(|_| Constraint::Length(3)));
        constraints.push(Constraint::Min(0));

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let streak_text = if self.profile.streak_days > 0 {
            format!(
                "{} day streak (best {})",
                self.profile.streak_days, self.profile.best_streak
            )
        } else {
            "No streak yet".to_string()
        };
        let summary = vec![
            Line::from(Span::styled(
                format!(
                    " {} words learned \u{00b7} {} reviews",
                    self.progress.words_learned(),
                    self.profile.total_reviews
                ),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {streak_text}"),
                Style::default().fg(colors.text_dim()),
            )),
        ];
        Paragraph::new(summary).render(layout[0], buf);

        for (i, (name, total)) in self.decks.iter().enumerate() {
            let deck_stats = self.progress.decks.get(name);
            let learned = deck_stats.map_or(0, |d| d.learned.len());
            let reviews = deck_stats.map_or(0, |d| d.reviews());
            let label = format!("{name} \u{00b7} {reviews} reviews");
            DeckBar::new(&label, learned, *total, self.theme).render(layout[i + 1], buf);
        }
    }
}
