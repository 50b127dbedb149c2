use howmanyouts_core::Correctness;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// One coloured chip per round played, in id order
pub struct HistoryWidget<'a> {
    pub marks: &'a [(u32, Option<Correctness>)],
    /// Round being reviewed, drawn inverted
    pub cursor: Option<u32>,
}

impl<'a> HistoryWidget<'a> {
    pub fn new(marks: &'a [(u32, Option<Correctness>)]) -> Self {
        Self {
            marks,
            cursor: None,
        }
    }

    pub fn cursor(mut self, cursor: Option<u32>) -> Self {
        self.cursor = cursor;
        self
    }
}

impl<'a> Widget for HistoryWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let mut spans = vec![Span::styled(
            "History ",
            Style::default().fg(Theme::MUTED_TEXT),
        )];
        for (id, mark) in self.marks {
            let mut style = Style::default()
                .fg(Theme::BG)
                .bg(Theme::correctness(*mark))
                .add_modifier(Modifier::BOLD);
            if self.cursor == Some(*id) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!(" {:>2} ", id), style));
            spans.push(Span::raw(" "));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
