use howmanyouts_core::format::group_digits;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Top HUD showing round, stake, score and the round clock
pub struct HudWidget {
    pub round_id: Option<u32>,
    pub stake: u32,
    pub score: u64,
    /// Seconds left on the clock, `None` when the round is untimed
    pub seconds_left: Option<f64>,
}

impl HudWidget {
    pub fn new(round_id: Option<u32>, stake: u32, score: u64) -> Self {
        Self {
            round_id,
            stake,
            score,
            seconds_left: None,
        }
    }

    pub fn seconds_left(mut self, seconds_left: Option<f64>) -> Self {
        self.seconds_left = seconds_left;
        self
    }
}

impl Widget for HudWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let chunks = Layout::horizontal([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

        let round = self
            .round_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let round_line = Line::from(vec![
            Span::styled("Round: ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                round,
                Style::default()
                    .fg(Theme::BRIGHT_TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(chunks[0].x, chunks[0].y, &round_line, chunks[0].width);

        let stake_line = Line::from(vec![
            Span::styled("Stake: ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                group_digits(self.stake as i64),
                Style::default()
                    .fg(Theme::STAKE_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(chunks[1].x, chunks[1].y, &stake_line, chunks[1].width);

        let score_line = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                group_digits(self.score as i64),
                Style::default()
                    .fg(Theme::SCORE_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(chunks[2].x, chunks[2].y, &score_line, chunks[2].width);

        let clock = match self.seconds_left {
            Some(secs) => format!("{:.1}s", secs),
            None => "\u{221e}".to_string(), // ∞
        };
        let clock_line = Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                clock,
                Style::default()
                    .fg(Theme::CLOCK_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(chunks[3].x, chunks[3].y, &clock_line, chunks[3].width);
    }
}
