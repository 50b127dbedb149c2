use howmanyouts_core::CardToken;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Width and height of a card in terminal cells
pub const CARD_WIDTH: u16 = 7;
pub const CARD_HEIGHT: u16 = 5;

/// A single card slot. An empty slot renders face down.
pub struct CardWidget {
    pub card: Option<CardToken>,
    pub highlighted: bool,
    pub dimmed: bool,
}

impl CardWidget {
    pub fn new(card: CardToken) -> Self {
        Self {
            card: Some(card),
            highlighted: false,
            dimmed: false,
        }
    }

    pub fn face_down() -> Self {
        Self {
            card: None,
            highlighted: false,
            dimmed: false,
        }
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    fn border_color(&self) -> ratatui::style::Color {
        if self.highlighted {
            Theme::CARD_SELECTED
        } else {
            Theme::CARD_BORDER
        }
    }
}

impl Widget for CardWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < CARD_WIDTH || area.height < CARD_HEIGHT {
            return;
        }

        let border_style = Style::default().fg(self.border_color());
        render_frame(area, buf, border_style);

        let Some(card) = self.card else {
            render_back(area, buf);
            return;
        };

        let suit_color = if self.dimmed {
            Theme::DIM_TEXT
        } else if card.suit.is_red() {
            Theme::RED_SUIT
        } else {
            Theme::BLACK_SUIT
        };
        let rank_style = Style::default().fg(suit_color).add_modifier(Modifier::BOLD);
        let suit_style = Style::default().fg(suit_color);

        let rank = card.rank.short_name();
        let suit = card.suit.symbol().to_string();

        // Top-left: rank and suit
        buf.set_string(area.x + 1, area.y + 1, rank, rank_style);
        buf.set_string(area.x + 1 + rank.len() as u16, area.y + 1, &suit, suit_style);

        // Center suit
        buf.set_string(area.x + CARD_WIDTH / 2, area.y + CARD_HEIGHT / 2, &suit, suit_style);

        // Bottom-right: rank and suit
        let br_y = area.y + CARD_HEIGHT - 2;
        let br_x = area.x + CARD_WIDTH - 2 - rank.len() as u16;
        buf.set_string(br_x, br_y, rank, rank_style);
        buf.set_string(area.x + CARD_WIDTH - 2, br_y, &suit, suit_style);
    }
}

fn render_frame(area: Rect, buf: &mut Buffer, border_style: Style) {
    // Top border
    buf.set_string(area.x, area.y, "\u{256d}", border_style); // ╭
    for x in 1..CARD_WIDTH - 1 {
        buf.set_string(area.x + x, area.y, "\u{2500}", border_style); // ─
    }
    buf.set_string(area.x + CARD_WIDTH - 1, area.y, "\u{256e}", border_style); // ╮

    // Side borders
    for y in 1..CARD_HEIGHT - 1 {
        buf.set_string(area.x, area.y + y, "\u{2502}", border_style); // │
        for x in 1..CARD_WIDTH - 1 {
            buf.set_string(area.x + x, area.y + y, " ", Style::default());
        }
        buf.set_string(area.x + CARD_WIDTH - 1, area.y + y, "\u{2502}", border_style);
    }

    // Bottom border
    buf.set_string(area.x, area.y + CARD_HEIGHT - 1, "\u{2570}", border_style); // ╰
    for x in 1..CARD_WIDTH - 1 {
        buf.set_string(area.x + x, area.y + CARD_HEIGHT - 1, "\u{2500}", border_style);
    }
    buf.set_string(
        area.x + CARD_WIDTH - 1,
        area.y + CARD_HEIGHT - 1,
        "\u{256f}",
        border_style,
    ); // ╯
}

fn render_back(area: Rect, buf: &mut Buffer) {
    let fill_style = Style::default().fg(Theme::CARD_BACK);
    for y in 1..CARD_HEIGHT - 1 {
        for x in 1..CARD_WIDTH - 1 {
            let pattern = if (x + y) % 2 == 0 {
                "\u{2593}"
            } else {
                "\u{2591}"
            }; // ▓ ░
            buf.set_string(area.x + x, area.y + y, pattern, fill_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_up_card_shows_rank_and_suit() {
        let area = Rect::new(0, 0, CARD_WIDTH, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        CardWidget::new("10h".parse().unwrap()).render(area, &mut buf);

        assert_eq!(buf[(1, 1)].symbol(), "1");
        assert_eq!(buf[(2, 1)].symbol(), "0");
        assert_eq!(buf[(3, 1)].symbol(), "\u{2665}");
        assert_eq!(buf[(3, 2)].symbol(), "\u{2665}");
    }

    #[test]
    fn test_face_down_card_is_patterned() {
        let area = Rect::new(0, 0, CARD_WIDTH, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        CardWidget::face_down().render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "\u{256d}");
        assert_eq!(buf[(1, 1)].symbol(), "\u{2593}");
        assert_eq!(buf[(2, 1)].symbol(), "\u{2591}");
    }
}
