use howmanyouts_core::format::{displayed_outs, outs_percentage};
use howmanyouts_core::{Correctness, Feedback};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Widget};

use crate::theme::Theme;

/// The verdict on a guess: outs count, percentage and the out cards themselves
pub struct OutsWidget<'a> {
    pub feedback: &'a Feedback,
    pub correctness: Correctness,
}

impl<'a> OutsWidget<'a> {
    pub fn new(feedback: &'a Feedback) -> Self {
        Self {
            feedback,
            correctness: feedback.correctness(),
        }
    }

    fn verdict(&self) -> &'static str {
        match self.correctness {
            Correctness::Perfect => "Perfect!",
            Correctness::Close => "Close",
            Correctness::Wrong => "Wrong",
            Correctness::Pass => "Passed",
        }
    }
}

impl<'a> Widget for OutsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::correctness(Some(self.correctness))))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 {
            return;
        }

        let fb = self.feedback;
        let guess = if fb.is_forced() {
            "-".to_string()
        } else {
            fb.guess.to_string()
        };
        // The percentage always uses the real count
        let shown = displayed_outs(fb.outs.len());
        let summary = Line::from(vec![
            Span::styled(
                self.verdict(),
                Style::default()
                    .fg(Theme::correctness(Some(self.correctness)))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  You said ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(guess, Style::default().fg(Theme::BRIGHT_TEXT)),
            Span::styled(", there were ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                shown.to_string(),
                Style::default()
                    .fg(Theme::BRIGHT_TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({}%)", outs_percentage(fb.outs.len(), fb.draws)),
                Style::default().fg(Theme::MUTED_TEXT),
            ),
            Span::styled(
                format!("  +{}", fb.points),
                Style::default()
                    .fg(Theme::SCORE_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(inner.x, inner.y, &summary, inner.width);

        // Out cards, compact, capped at the display ceiling
        let mut spans = Vec::with_capacity(shown + 1);
        for card in &fb.outs[..shown] {
            let color = if card.suit.is_red() {
                Theme::RED_SUIT
            } else {
                Theme::BLACK_SUIT
            };
            spans.push(Span::styled(
                format!("{}{} ", card.rank, card.suit.symbol()),
                Style::default().fg(color),
            ));
        }
        if fb.outs.len() > shown {
            spans.push(Span::styled(
                format!("+{} more", fb.outs.len() - shown),
                Style::default().fg(Theme::DIM_TEXT),
            ));
        }
        buf.set_line(inner.x, inner.y + 1, &Line::from(spans), inner.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use howmanyouts_core::{CardToken, Rank, Suit};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn feedback(outs: usize, guess: u32, distance: i32) -> Feedback {
        let ranks = ["2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K", "A"];
        let suits = [Suit::Clubs, Suit::Diamonds];
        let outs: Vec<CardToken> = suits
            .iter()
            .flat_map(|&suit| {
                ranks.iter().filter_map(move |r| {
                    Rank::from_text(r).map(|rank| CardToken { rank, suit })
                })
            })
            .take(outs)
            .collect();
        Feedback {
            id: 3,
            guess,
            distance,
            outs,
            draws: 44,
            points: 900,
            score: 2700,
            rank: None,
            rank_interval: None,
            more: true,
        }
    }

    #[test]
    fn test_count_is_capped_but_percentage_is_not() {
        let fb = feedback(20, 12, 8);
        let area = Rect::new(0, 0, 80, 4);
        let mut buf = Buffer::empty(area);
        OutsWidget::new(&fb).render(area, &mut buf);

        let summary = row_text(&buf, 1);
        assert!(summary.contains("there were 15 (45%)"), "{}", summary);
        assert!(row_text(&buf, 2).contains("+5 more"));
    }

    #[test]
    fn test_forced_pass_shows_no_guess() {
        let fb = feedback(4, howmanyouts_core::GUESS_EXPIRED, 97);
        let area = Rect::new(0, 0, 80, 4);
        let mut buf = Buffer::empty(area);
        OutsWidget::new(&fb).render(area, &mut buf);

        let summary = row_text(&buf, 1);
        assert!(summary.contains("Wrong"));
        assert!(summary.contains("You said -, there were 4 (9%)"));
        assert!(!row_text(&buf, 2).contains("more"));
    }
}
