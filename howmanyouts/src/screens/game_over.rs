use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use howmanyouts_core::format::group_digits;
use howmanyouts_core::RoundController;
use howmanyouts_widgets::card::CARD_HEIGHT;
use howmanyouts_widgets::history::HistoryWidget;
use howmanyouts_widgets::outs::OutsWidget;
use howmanyouts_widgets::Theme;

use crate::app::ScreenAction;
use crate::screens::play_round::render_table;
use crate::screens::{key_help, Screen};
use crate::view::TableView;

pub struct GameOverScreen {
    /// Round being reviewed
    pub cursor: Option<u32>,
    share_url: String,
}

impl GameOverScreen {
    pub fn new(share_url: impl Into<String>) -> Self {
        Self {
            cursor: None,
            share_url: share_url.into(),
        }
    }
}

impl Screen for GameOverScreen {
    fn render(&mut self, frame: &mut Frame, view: &TableView, game: &RoundController) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2 * (CARD_HEIGHT + 1)),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "GAME OVER",
                Style::default()
                    .fg(Theme::WRONG)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            chunks[0],
        );

        let mut summary = vec![Line::from(vec![
            Span::styled("Final score ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                group_digits(view.score as i64),
                Style::default()
                    .fg(Theme::SCORE_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];
        if let Some(last) = &view.game_over {
            let rank = |r: Option<u32>| r.map(|r| format!("#{}", r)).unwrap_or_else(|| "-".to_string());
            summary.push(Line::from(Span::styled(
                format!(
                    "All time {}   This week {}",
                    rank(last.rank),
                    rank(last.rank_interval)
                ),
                Style::default().fg(Theme::BRIGHT_TEXT),
            )));
        }
        frame.render_widget(
            Paragraph::new(summary).alignment(Alignment::Center),
            chunks[1],
        );

        if let Some(share) = game.share_text(&self.share_url) {
            frame.render_widget(
                Paragraph::new(Span::styled(share, Style::default().fg(Theme::DIM_TEXT)))
                    .alignment(Alignment::Center),
                chunks[2],
            );
        }

        frame.render_widget(HistoryWidget::new(&view.marks).cursor(self.cursor), chunks[3]);

        let reviewed = self.cursor.and_then(|id| game.review(id));
        render_table(frame, reviewed, chunks[4]);

        if let Some(feedback) = reviewed.and_then(|r| r.feedback.as_ref()) {
            let outs = OutsWidget::new(feedback);
            let outs_area = Layout::vertical([Constraint::Max(4)]).split(chunks[5])[0];
            frame.render_widget(outs, outs_area);
        }

        let help = Paragraph::new(key_help(&[
            ("\u{2190}\u{2192}", "Review"),
            ("Enter", "New Game"),
            ("H", "Scores"),
            ("S", "Set Name"),
            ("Esc", "Menu"),
            ("q", "Quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[6]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Left => Some(ScreenAction::ReviewStep { forward: false }),
            KeyCode::Right => Some(ScreenAction::ReviewStep { forward: true }),
            KeyCode::Enter => Some(ScreenAction::NewGame),
            KeyCode::Char('h') | KeyCode::Char('H') => Some(ScreenAction::ShowHiScores),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(ScreenAction::EditName),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(ScreenAction::Quit),
            KeyCode::Esc => Some(ScreenAction::BackToMenu),
            _ => None,
        }
    }
}
