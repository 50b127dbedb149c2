use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use howmanyouts_core::controller::MAX_NAME_LEN;
use howmanyouts_core::RoundController;
use howmanyouts_widgets::Theme;

use crate::app::ScreenAction;
use crate::screens::{key_help, Screen};
use crate::view::TableView;

/// Single-line editor for the leaderboard name
pub struct NameEntryScreen {
    pub buffer: String,
}

impl NameEntryScreen {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn reset(&mut self, current: &str) {
        self.buffer = current.chars().take(MAX_NAME_LEN).collect();
    }
}

impl Screen for NameEntryScreen {
    fn render(&mut self, frame: &mut Frame, _view: &TableView, _game: &RoundController) {
        let area = frame.area();
        let chunks = Layout::vertical([
            Constraint::Percentage(35),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

        let width = (MAX_NAME_LEN as u16 + 4).min(chunks[1].width);
        let field = Rect::new(
            chunks[1].x + (chunks[1].width - width) / 2,
            chunks[1].y,
            width,
            3,
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::GOLD))
            .title(Line::from(" Your name ").centered());
        let text = Line::from(vec![
            Span::styled(
                self.buffer.as_str(),
                Style::default()
                    .fg(Theme::BRIGHT_TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("_", Style::default().fg(Theme::GOLD)),
        ]);
        frame.render_widget(Paragraph::new(text).block(block), field);

        let help = Paragraph::new(key_help(&[("Enter", "Save"), ("Esc", "Cancel")]))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[3]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Char(c) if !c.is_control() => {
                if self.buffer.chars().count() < MAX_NAME_LEN {
                    self.buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Enter => return Some(ScreenAction::SubmitName(self.buffer.clone())),
            KeyCode::Esc => return Some(ScreenAction::Back),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut NameEntryScreen, code: KeyCode) -> Option<ScreenAction> {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_typing_stops_at_max_length() {
        let mut screen = NameEntryScreen::new();
        for _ in 0..40 {
            press(&mut screen, KeyCode::Char('a'));
        }
        press(&mut screen, KeyCode::Backspace);
        assert_eq!(screen.buffer.len(), MAX_NAME_LEN - 1);
        match press(&mut screen, KeyCode::Enter) {
            Some(ScreenAction::SubmitName(name)) => assert_eq!(name, screen.buffer),
            other => panic!("unexpected {:?}", other),
        }
    }
}
