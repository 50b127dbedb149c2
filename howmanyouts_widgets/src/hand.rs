use howmanyouts_core::CardToken;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::card::{CardWidget, CARD_HEIGHT, CARD_WIDTH};

/// A row of card slots. Slots past the end of `cards` render face down,
/// so the board keeps all five positions while only the turn is dealt.
pub struct CardRowWidget<'a> {
    pub cards: &'a [CardToken],
    pub slots: usize,
    pub spacing: u16,
    pub highlighted: bool,
}

impl<'a> CardRowWidget<'a> {
    pub fn new(cards: &'a [CardToken], slots: usize) -> Self {
        Self {
            cards,
            slots: slots.max(cards.len()),
            spacing: 1,
            highlighted: false,
        }
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Calculate the total width needed for the row
    pub fn total_width(&self) -> u16 {
        let n = self.slots as u16;
        if n == 0 {
            return 0;
        }
        n * CARD_WIDTH + (n - 1) * self.spacing
    }

    /// Get the Rect for a specific slot given the row area
    pub fn card_rect(&self, area: Rect, slot: usize) -> Option<Rect> {
        if slot >= self.slots {
            return None;
        }

        let total_w = self.total_width();
        let start_x = area.x + area.width.saturating_sub(total_w) / 2;
        let x = start_x + (slot as u16) * (CARD_WIDTH + self.spacing);

        Some(Rect::new(x, area.y, CARD_WIDTH, CARD_HEIGHT))
    }
}

impl<'a> Widget for CardRowWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < CARD_HEIGHT {
            return;
        }

        for slot in 0..self.slots {
            if let Some(card_area) = self.card_rect(area, slot) {
                // Bounds check
                if card_area.right() > area.right() {
                    continue;
                }

                let widget = match self.cards.get(slot) {
                    Some(card) => CardWidget::new(*card),
                    None => CardWidget::face_down(),
                };
                widget.highlighted(self.highlighted).render(card_area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_is_centered() {
        let cards: Vec<CardToken> = vec!["Ah".parse().unwrap(), "Kd".parse().unwrap()];
        let row = CardRowWidget::new(&cards, 2);
        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        // 2 * 7 + 1 = 15 wide, centered in 40
        assert_eq!(row.total_width(), 15);
        assert_eq!(row.card_rect(area, 0).unwrap().x, 12);
        assert_eq!(row.card_rect(area, 1).unwrap().x, 20);
        assert!(row.card_rect(area, 2).is_none());
    }

    #[test]
    fn test_missing_cards_render_face_down() {
        let cards: Vec<CardToken> = vec!["2c".parse().unwrap()];
        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        let row = CardRowWidget::new(&cards, 5);
        let second = row.card_rect(area, 1).unwrap();
        row.render(area, &mut buf);
        assert_eq!(buf[(second.x + 1, second.y + 1)].symbol(), "\u{2593}");
    }
}
