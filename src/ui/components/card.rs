use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::deck::Word;
use crate::input::gesture::Lean;
use crate::session::flash::Status;
use crate::ui::theme::Theme;

/// The flashcard: the word under review, its details when revealed, the lean
/// hint mid-drag, and a border flash on pass/fail.
pub struct Card<'a> {
    word: Option<&'a Word>,
    show_details: bool,
    status: Option<Status>,
    lean: Option<Lean>,
    theme: &'a Theme,
}

impl<'a> Card<'a> {
    pub fn new(
        word: Option<&'a Word>,
        show_details: bool,
        status: Option<Status>,
        lean: Option<Lean>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            word,
            show_details,
            status,
            lean,
            theme,
        }
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border_color = match self.status {
            Some(Status::Pass) => colors.pass(),
            Some(Status::Fail) => colors.fail(),
            None => colors.border(),
        };
        let block = Block::bordered()
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 4 {
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        // Lean hint row while the card is being pulled
        let hint = match self.lean {
            Some(Lean::Right) => Some(Span::styled(
                "I know this word \u{2192}",
                Style::default()
                    .fg(colors.know_hint())
                    .add_modifier(Modifier::BOLD),
            )),
            Some(Lean::Left) => Some(Span::styled(
                "\u{2190} I don't know this word",
                Style::default()
                    .fg(colors.dont_know_hint())
                    .add_modifier(Modifier::BOLD),
            )),
            None => None,
        };
        if let Some(hint) = hint {
            Paragraph::new(Line::from(hint))
                .alignment(match self.lean {
                    Some(Lean::Right) => Alignment::Right,
                    _ => Alignment::Left,
                })
                .render(layout[0], buf);
        }

        let Some(word) = self.word else {
            Paragraph::new(Line::from(Span::styled(
                "No words to review",
                Style::default().fg(colors.text_dim()),
            )))
            .alignment(Alignment::Center)
            .render(layout[1], buf);
            return;
        };

        let word_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                word.word.clone(),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "{} \u{00b7} difficulty {} \u{00b7} frequency {}",
                    word.language, word.difficulty, word.frequency
                ),
                Style::default().fg(colors.text_dim()),
            )),
        ];
        Paragraph::new(word_lines)
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        if self.show_details {
            let mut detail_lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    word.definition.clone(),
                    Style::default().fg(colors.accent()),
                )),
            ];
            if let Some(ref example) = word.example {
                detail_lines.push(Line::from(""));
                detail_lines.push(Line::from(Span::styled(
                    format!("\u{201c}{example}\u{201d}"),
                    Style::default()
                        .fg(colors.text_dim())
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            Paragraph::new(detail_lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(layout[2], buf);
        }
    }
}
