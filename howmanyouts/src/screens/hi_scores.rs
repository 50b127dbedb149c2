use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use howmanyouts_core::{RoundController, ScoreScope};
use howmanyouts_widgets::popup::centered_rect;
use howmanyouts_widgets::scoreboard::ScoreboardWidget;

use crate::app::ScreenAction;
use crate::screens::{key_help, Screen};
use crate::view::TableView;

pub struct HiScoresScreen {
    pub scope: ScoreScope,
}

impl HiScoresScreen {
    pub fn new() -> Self {
        Self {
            scope: ScoreScope::AllTime,
        }
    }
}

impl Screen for HiScoresScreen {
    fn render(&mut self, frame: &mut Frame, view: &TableView, _game: &RoundController) {
        let area = frame.area();
        let [body, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        // A board for the other scope may still be in flight
        let board = view.scoreboard.as_ref().filter(|b| b.scope == self.scope);
        frame.render_widget(ScoreboardWidget::new(board), centered_rect(60, 90, body));

        let help = Paragraph::new(key_help(&[
            ("Tab", self.scope.toggle().to_string().as_str()),
            ("Esc", "Back"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, footer);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => Some(ScreenAction::ToggleScope),
            KeyCode::Esc | KeyCode::Char('q') => Some(ScreenAction::Back),
            _ => None,
        }
    }
}
