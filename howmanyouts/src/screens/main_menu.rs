use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use howmanyouts_core::{RoundController, RoundPhase};
use howmanyouts_widgets::scoreboard::LeadersWidget;
use howmanyouts_widgets::Theme;

use crate::app::ScreenAction;
use crate::screens::{key_help, Screen};
use crate::view::TableView;

const TITLE: [&str; 6] = [
    r" _   _                 __  __                      ___        _       ",
    r"| | | | _____      __ |  \/  | __ _ _ __  _   _   / _ \ _   _| |_ ___ ",
    r"| |_| |/ _ \ \ /\ / / | |\/| |/ _` | '_ \| | | | | | | | | | | __/ __|",
    r"|  _  | (_) \ V  V /  | |  | | (_| | | | | |_| | | |_| | |_| | |_\__ \",
    r"|_| |_|\___/ \_/\_/   |_|  |_|\__,_|_| |_|\__, |  \___/ \__,_|\__|___/",
    r"                                          |___/                       ",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Resume,
    NewGame,
    HiScores,
    SetName,
    Quit,
}

impl MenuItem {
    fn label(self) -> &'static str {
        match self {
            MenuItem::Resume => "Resume",
            MenuItem::NewGame => "New Game",
            MenuItem::HiScores => "Hi Scores",
            MenuItem::SetName => "Set Name",
            MenuItem::Quit => "Quit",
        }
    }

    fn action(self) -> ScreenAction {
        match self {
            MenuItem::Resume => ScreenAction::Resume,
            MenuItem::NewGame => ScreenAction::NewGame,
            MenuItem::HiScores => ScreenAction::ShowHiScores,
            MenuItem::SetName => ScreenAction::EditName,
            MenuItem::Quit => ScreenAction::Quit,
        }
    }
}

pub struct MainMenuScreen {
    pub selected: usize,
    items: Vec<MenuItem>,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self {
            selected: 0,
            items: Self::items_for(false),
        }
    }

    fn items_for(resumable: bool) -> Vec<MenuItem> {
        let mut items = vec![
            MenuItem::NewGame,
            MenuItem::HiScores,
            MenuItem::SetName,
            MenuItem::Quit,
        ];
        if resumable {
            items.insert(0, MenuItem::Resume);
        }
        items
    }
}

impl Screen for MainMenuScreen {
    fn render(&mut self, frame: &mut Frame, view: &TableView, game: &RoundController) {
        let area = frame.area();

        let resumable = !matches!(game.phase(), RoundPhase::Idle | RoundPhase::Ended);
        let items = Self::items_for(resumable);
        if items != self.items {
            self.items = items;
            self.selected = 0;
        }

        let chunks = Layout::vertical([
            Constraint::Percentage(20),
            Constraint::Length(9),
            Constraint::Length(self.items.len() as u16 + 1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        let title_style = Style::default()
            .fg(Theme::GOLD)
            .add_modifier(Modifier::BOLD);
        let mut title_lines: Vec<Line> = TITLE
            .iter()
            .map(|row| Line::from(Span::styled(*row, title_style)))
            .collect();
        title_lines.push(Line::from(""));
        title_lines.push(Line::from(Span::styled(
            "Count the cards that win you the river",
            Style::default().fg(Theme::MUTED_TEXT),
        )));
        frame.render_widget(
            Paragraph::new(title_lines).alignment(Alignment::Center),
            chunks[1],
        );

        let mut menu_lines = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            let style = if i == self.selected {
                Style::default()
                    .fg(Theme::CARD_SELECTED)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Theme::MUTED_TEXT)
            };
            let prefix = if i == self.selected { "> " } else { "  " };
            menu_lines.push(Line::from(Span::styled(
                format!("{}{}", prefix, item.label()),
                style,
            )));
        }
        frame.render_widget(
            Paragraph::new(menu_lines).alignment(Alignment::Center),
            chunks[2],
        );

        if let Some(info) = &view.info {
            let width = chunks[4].width.min(64);
            let x = chunks[4].x + (chunks[4].width - width) / 2;
            let leaders = ratatui::layout::Rect::new(x, chunks[4].y, width, 1);
            frame.render_widget(LeadersWidget::new(info), leaders);
        }

        let footer = Paragraph::new(key_help(&[
            ("\u{2191}\u{2193}", "Navigate"),
            ("Enter", "Select"),
            ("q", "Quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[5]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.items.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => return self.items.get(self.selected).map(|i| i.action()),
            KeyCode::Char('h') | KeyCode::Char('H') => return Some(ScreenAction::ShowHiScores),
            KeyCode::Char('q') => return Some(ScreenAction::Quit),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_menu_walks_items() {
        let mut menu = MainMenuScreen::new();
        assert!(matches!(
            menu.handle_key(press(KeyCode::Enter)),
            Some(ScreenAction::NewGame)
        ));
        for _ in 0..10 {
            menu.handle_key(press(KeyCode::Down));
        }
        assert!(matches!(
            menu.handle_key(press(KeyCode::Enter)),
            Some(ScreenAction::Quit)
        ));
    }
}
