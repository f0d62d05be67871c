use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// One-line learned/total bar for a deck.
pub struct DeckBar<'a> {
    pub label: String,
    pub learned: usize,
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> DeckBar<'a> {
    pub fn new(label: &str, learned: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            learned: learned.min(total),
            total,
            theme,
        }
    }

    fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.learned as f64 / self.total as f64
    }
}

impl Widget for DeckBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio() * inner.width as f64) as u16;
        let label = format!("{}/{} learned", self.learned, self.total);

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}
