use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Widget};

use crate::theme::Theme;

/// A centered popup overlay
pub struct PopupWidget {
    pub title: String,
    pub lines: Vec<(String, Style)>,
    pub border: ratatui::style::Color,
    pub width_percent: u16,
    pub height_percent: u16,
}

impl PopupWidget {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            border: Theme::CARD_SELECTED,
            width_percent: 60,
            height_percent: 40,
        }
    }

    pub fn line(mut self, text: impl Into<String>, style: Style) -> Self {
        self.lines.push((text.into(), style));
        self
    }

    pub fn border(mut self, color: ratatui::style::Color) -> Self {
        self.border = color;
        self
    }

    pub fn size(mut self, width_percent: u16, height_percent: u16) -> Self {
        self.width_percent = width_percent;
        self.height_percent = height_percent;
        self
    }
}

impl Widget for PopupWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect(self.width_percent, self.height_percent, area);

        Clear.render(popup_area, buf);

        let title_line = Line::from(Span::styled(
            format!(" {} ", self.title),
            Style::default()
                .fg(Theme::GOLD)
                .add_modifier(Modifier::BOLD),
        ));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(self.border))
            .title(title_line)
            .title_alignment(Alignment::Center)
            .padding(Padding::uniform(1));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        // Render lines centered
        for (i, (text, style)) in self.lines.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.bottom() {
                break;
            }
            let width = text.chars().count() as u16;
            let x = inner.x + inner.width.saturating_sub(width) / 2;
            buf.set_stringn(x, y, text, inner.width as usize, *style);
        }
    }
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let scale = |len: u16, percent: u16| (u32::from(len) * u32::from(percent.min(100)) / 100) as u16;
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_on_a_wide_terminal() {
        // 1200 * 60 does not fit in a u16
        let area = Rect::new(0, 0, 1200, 40);
        let rect = centered_rect(60, 50, area);
        assert_eq!(rect, Rect::new(240, 10, 720, 20));
    }

    #[test]
    fn test_centered_rect_clamps_percent() {
        let area = Rect::new(5, 2, 80, 24);
        assert_eq!(centered_rect(150, 100, area), area);
    }
}
