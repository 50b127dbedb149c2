pub mod game_over;
pub mod hi_scores;
pub mod main_menu;
pub mod name_entry;
pub mod play_round;

use crossterm::event::KeyEvent;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::Frame;

use howmanyouts_core::RoundController;
use howmanyouts_widgets::Theme;

use crate::app::ScreenAction;
use crate::view::TableView;

/// Trait for client screens
pub trait Screen {
    fn render(&mut self, frame: &mut Frame, view: &TableView, game: &RoundController);
    fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction>;
}

/// Footer line of `[key] label` pairs
pub fn key_help(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 3);
    for (i, (key, label)) in pairs.iter().enumerate() {
        let open = if i == 0 { "[" } else { "  [" };
        spans.push(Span::styled(open, Style::default().fg(Theme::DIM_TEXT)));
        spans.push(Span::styled(key.to_string(), Style::default().fg(Theme::GOLD)));
        spans.push(Span::styled(
            format!("] {}", label),
            Style::default().fg(Theme::DIM_TEXT),
        ));
    }
    Line::from(spans)
}
