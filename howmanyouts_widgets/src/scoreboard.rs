use howmanyouts_core::format::group_digits;
use howmanyouts_core::{GameInfo, Scoreboard};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Widget};

use crate::theme::Theme;

/// Hi-score table for one scope
pub struct ScoreboardWidget<'a> {
    pub board: Option<&'a Scoreboard>,
}

impl<'a> ScoreboardWidget<'a> {
    pub fn new(board: Option<&'a Scoreboard>) -> Self {
        Self { board }
    }
}

impl<'a> Widget for ScoreboardWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.board {
            Some(board) => format!(" Hi Scores: {} ", board.scope),
            None => " Hi Scores ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::GOLD))
            .title(Line::from(title).centered())
            .padding(Padding::uniform(1));

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(board) = self.board else {
            buf.set_string(
                inner.x,
                inner.y,
                "Loading...",
                Style::default().fg(Theme::DIM_TEXT),
            );
            return;
        };

        if board.entries.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                "No finished games yet",
                Style::default().fg(Theme::DIM_TEXT),
            );
            return;
        }

        for (i, entry) in board.entries.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.bottom() {
                break;
            }
            let name_style = if entry.position == 1 {
                Style::default()
                    .fg(Theme::GOLD)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Theme::BRIGHT_TEXT)
            };
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>2}. ", entry.position),
                    Style::default().fg(Theme::MUTED_TEXT),
                ),
                Span::styled(format!("{:<32}", entry.name), name_style),
                Span::styled(
                    format!("{:>10}", group_digits(entry.score as i64)),
                    Style::default().fg(Theme::SCORE_COLOR),
                ),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

/// Single line naming the all-time and weekly leaders
pub struct LeadersWidget<'a> {
    pub info: &'a GameInfo,
}

impl<'a> LeadersWidget<'a> {
    pub fn new(info: &'a GameInfo) -> Self {
        Self { info }
    }
}

impl<'a> Widget for LeadersWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }
        let line = Line::from(vec![
            Span::styled("Best ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                self.info.alltime.name.as_str(),
                Style::default().fg(Theme::BRIGHT_TEXT),
            ),
            Span::styled(
                format!(" {}", group_digits(self.info.alltime.score as i64)),
                Style::default().fg(Theme::SCORE_COLOR),
            ),
            Span::styled("  \u{2502}  This week ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                self.info.interval.name.as_str(),
                Style::default().fg(Theme::BRIGHT_TEXT),
            ),
            Span::styled(
                format!(" {}", group_digits(self.info.interval.score as i64)),
                Style::default().fg(Theme::SCORE_COLOR),
            ),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use howmanyouts_core::{ScoreEntry, ScoreScope};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_entries_render_in_order() {
        let board = Scoreboard {
            scope: ScoreScope::AllTime,
            entries: vec![
                ScoreEntry {
                    position: 1,
                    name: "Dana".into(),
                    score: 48210,
                },
                ScoreEntry {
                    position: 2,
                    name: "Ralphie".into(),
                    score: 31500,
                },
            ],
        };
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        ScoreboardWidget::new(Some(&board)).render(area, &mut buf);

        assert!(row_text(&buf, 2).contains("1. Dana"));
        assert!(row_text(&buf, 2).contains("48,210"));
        assert!(row_text(&buf, 3).contains("2. Ralphie"));
    }
}
