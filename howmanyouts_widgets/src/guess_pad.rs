use howmanyouts_core::GUESS_PASS;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Widget};

use crate::theme::Theme;

/// Highest outs count offered as a button
pub const MAX_GUESS: u32 = 20;

const CELL_WIDTH: u16 = 3;
const PASS_LABEL: &str = " Pass ";

/// Row of guess buttons: 0 through 20 followed by Pass
pub struct GuessPadWidget {
    pub selected: u32,
    pub enabled: bool,
}

impl GuessPadWidget {
    pub fn new(selected: u32, enabled: bool) -> Self {
        Self { selected, enabled }
    }

    fn content_width() -> u16 {
        (MAX_GUESS as u16 + 1) * CELL_WIDTH + PASS_LABEL.len() as u16
    }

    /// Inner row the buttons are laid out on
    fn button_row(area: Rect) -> Rect {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let width = Self::content_width().min(inner.width);
        let x = inner.x + inner.width.saturating_sub(width) / 2;
        Rect::new(x, inner.y, width, 1)
    }

    /// Which guess a click at (col, row) lands on
    pub fn hit_test(area: Rect, col: u16, row: u16) -> Option<u32> {
        let buttons = Self::button_row(area);
        if row != buttons.y || col < buttons.x || col >= buttons.right() {
            return None;
        }
        let offset = (col - buttons.x) / CELL_WIDTH;
        if offset as u32 <= MAX_GUESS {
            Some(offset as u32)
        } else {
            Some(GUESS_PASS)
        }
    }
}

impl Widget for GuessPadWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 {
            return;
        }

        let border_color = if self.enabled {
            Theme::GOLD
        } else {
            Theme::DIM_TEXT
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(Line::from(" How many outs? ").centered());
        block.render(area, buf);

        let buttons = Self::button_row(area);
        let normal = if self.enabled {
            Style::default().fg(Theme::BRIGHT_TEXT)
        } else {
            Style::default().fg(Theme::DIM_TEXT)
        };
        let active = Style::default()
            .fg(Theme::BG)
            .bg(if self.enabled {
                Theme::CARD_SELECTED
            } else {
                Theme::DIM_TEXT
            })
            .add_modifier(Modifier::BOLD);

        let mut x = buttons.x;
        for value in 0..=MAX_GUESS {
            if x + CELL_WIDTH > buttons.right() {
                return;
            }
            let style = if value == self.selected { active } else { normal };
            buf.set_string(x, buttons.y, format!("{:>2} ", value), style);
            x += CELL_WIDTH;
        }

        if x + PASS_LABEL.len() as u16 <= buttons.right() {
            let style = if self.selected == GUESS_PASS {
                active
            } else {
                normal
            };
            buf.set_string(x, buttons.y, PASS_LABEL, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_maps_columns_to_guesses() {
        let area = Rect::new(0, 0, 80, 3);
        let row = GuessPadWidget::button_row(area);
        assert_eq!(GuessPadWidget::hit_test(area, row.x, row.y), Some(0));
        assert_eq!(
            GuessPadWidget::hit_test(area, row.x + 3 * CELL_WIDTH + 1, row.y),
            Some(3)
        );
        assert_eq!(
            GuessPadWidget::hit_test(area, row.right() - 1, row.y),
            Some(GUESS_PASS)
        );
        assert_eq!(GuessPadWidget::hit_test(area, row.x, row.y + 1), None);
    }
}
