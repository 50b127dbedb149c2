use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use howmanyouts_core::{CardToken, Round, RoundController, GUESS_PASS};
use howmanyouts_widgets::card::CARD_HEIGHT;
use howmanyouts_widgets::guess_pad::{GuessPadWidget, MAX_GUESS};
use howmanyouts_widgets::hand::CardRowWidget;
use howmanyouts_widgets::history::HistoryWidget;
use howmanyouts_widgets::hud::HudWidget;
use howmanyouts_widgets::outs::OutsWidget;
use howmanyouts_widgets::popup::PopupWidget;
use howmanyouts_widgets::scoreboard::LeadersWidget;
use howmanyouts_widgets::Theme;

use crate::app::ScreenAction;
use crate::screens::{key_help, Screen};
use crate::view::TableView;

const BOARD_SLOTS: usize = 5;
const HAND_SLOTS: usize = 2;
const HAND_CELL_WIDTH: u16 = 17;

pub struct PlayRoundScreen {
    /// Guess under the cursor, `GUESS_PASS` when Pass is selected
    pub selected: u32,
    /// Whether the last key was a digit, so a second one extends it
    typing: bool,
    pad_rect: Rect,
    pub hud_rect: Rect,
    pub table_rect: Rect,
}

impl PlayRoundScreen {
    pub fn new() -> Self {
        Self {
            selected: 0,
            typing: false,
            pad_rect: Rect::default(),
            hud_rect: Rect::default(),
            table_rect: Rect::default(),
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.typing = false;
    }

    fn type_digit(&mut self, digit: u32) {
        let extended = self.selected * 10 + digit;
        self.selected = if self.typing && extended <= MAX_GUESS {
            extended
        } else {
            digit
        };
        self.typing = true;
    }

    fn step(&mut self, forward: bool) {
        self.typing = false;
        self.selected = match (self.selected, forward) {
            (GUESS_PASS, true) => GUESS_PASS,
            (GUESS_PASS, false) => MAX_GUESS,
            (MAX_GUESS, true) => GUESS_PASS,
            (n, true) => n + 1,
            (n, false) => n.saturating_sub(1),
        };
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<ScreenAction> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let guess = GuessPadWidget::hit_test(self.pad_rect, mouse.column, mouse.row)?;
            self.selected = guess;
            self.typing = false;
            return Some(ScreenAction::Guess(guess));
        }
        None
    }

    fn render_error(&self, frame: &mut Frame, view: &TableView, area: Rect) {
        let Some(error) = &view.error else {
            return;
        };
        let popup = PopupWidget::new("Something went wrong")
            .line(
                error.to_string(),
                Style::default().fg(Theme::BRIGHT_TEXT),
            )
            .line(String::new(), Style::default())
            .line(
                "[R] Retry  [Esc] Dismiss".to_string(),
                Style::default().fg(Theme::GOLD),
            )
            .border(Theme::WRONG)
            .size(60, 30);
        frame.render_widget(popup, area);
    }
}

/// Board and hands for `round`, or face-down slots while a round is dealt
pub fn render_table(frame: &mut Frame, round: Option<&Round>, area: Rect) {
    let [board_area, hands_area] =
        Layout::vertical([Constraint::Length(CARD_HEIGHT + 1), Constraint::Length(CARD_HEIGHT + 1)])
            .areas(area);

    let board: &[CardToken] = round.map(|r| r.board.as_slice()).unwrap_or(&[]);
    let [board_label, board_cards] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(CARD_HEIGHT)]).areas(board_area);
    frame.render_widget(
        Paragraph::new(Span::styled("Board", Style::default().fg(Theme::MUTED_TEXT)))
            .alignment(Alignment::Center),
        board_label,
    );
    frame.render_widget(CardRowWidget::new(board, BOARD_SLOTS), board_cards);

    let empty: [&[CardToken]; 2] = [&[], &[]];
    let hands: Vec<&[CardToken]> = match round {
        Some(r) => r.hands.iter().map(|h| h.as_slice()).collect(),
        None => empty.to_vec(),
    };
    let cells = Layout::horizontal(vec![Constraint::Length(HAND_CELL_WIDTH); hands.len()])
        .flex(Flex::Center)
        .split(hands_area);

    for (i, (hand, cell)) in hands.into_iter().zip(cells.iter()).enumerate() {
        let [label_area, cards_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(CARD_HEIGHT)]).areas(*cell);
        let (label, color) = if i == 0 {
            ("You".to_string(), Theme::GOLD)
        } else {
            (format!("Opponent {}", i), Theme::MUTED_TEXT)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label, Style::default().fg(color)))
                .alignment(Alignment::Center),
            label_area,
        );
        frame.render_widget(
            CardRowWidget::new(hand, HAND_SLOTS).highlighted(i == 0),
            cards_area,
        );
    }
}

impl Screen for PlayRoundScreen {
    fn render(&mut self, frame: &mut Frame, view: &TableView, game: &RoundController) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(Theme::BG)), area);

        // leaders | hud | table | prompt | guess pad | outs | history | help
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2 * (CARD_HEIGHT + 1)),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        if let Some(info) = &view.info {
            frame.render_widget(LeadersWidget::new(info), chunks[0]);
        }

        self.hud_rect = chunks[1];
        let hud = HudWidget::new(view.round.as_ref().map(|r| r.id), view.stake, view.score)
            .seconds_left(game.countdown().map(|c| c.seconds_left()));
        frame.render_widget(hud, chunks[1]);

        self.table_rect = chunks[2];
        render_table(frame, view.round.as_ref(), chunks[2]);

        let prompt = match (&view.round, &view.feedback) {
            (Some(_), Some(_)) => Line::from(Span::styled(
                "Press N for the next round",
                Style::default().fg(Theme::MUTED_TEXT),
            )),
            (Some(round), None) => Line::from(Span::styled(
                round.standing.prompt(),
                Style::default().fg(Theme::BRIGHT_TEXT),
            )),
            (None, _) => Line::from(Span::styled(
                "Dealing...",
                Style::default().fg(Theme::DIM_TEXT),
            )),
        };
        frame.render_widget(Paragraph::new(prompt).alignment(Alignment::Center), chunks[3]);

        self.pad_rect = chunks[4];
        frame.render_widget(
            GuessPadWidget::new(self.selected, view.controls_enabled),
            chunks[4],
        );

        if let Some((feedback, _)) = &view.feedback {
            frame.render_widget(OutsWidget::new(feedback), chunks[5]);
        }

        let cursor = view.round.as_ref().map(|r| r.id);
        frame.render_widget(HistoryWidget::new(&view.marks).cursor(cursor), chunks[6]);

        let help = Paragraph::new(key_help(&[
            ("0-9 \u{2190}\u{2192}", "Pick"),
            ("Enter", "Guess"),
            ("P", "Pass"),
            ("N", "Next"),
            ("H", "Scores"),
            ("Esc", "Menu"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[7]);

        self.render_error(frame, view, area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.type_digit(c.to_digit(10).unwrap_or(0));
            }
            KeyCode::Left => self.step(false),
            KeyCode::Right => self.step(true),
            KeyCode::Enter => {
                self.typing = false;
                return Some(ScreenAction::Guess(self.selected));
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.typing = false;
                return Some(ScreenAction::Guess(GUESS_PASS));
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char(' ') => {
                return Some(ScreenAction::NextRound);
            }
            KeyCode::Char('h') | KeyCode::Char('H') => return Some(ScreenAction::ShowHiScores),
            KeyCode::Esc => return Some(ScreenAction::BackToMenu),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut PlayRoundScreen, code: KeyCode) -> Option<ScreenAction> {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_two_digits_make_one_guess() {
        let mut screen = PlayRoundScreen::new();
        press(&mut screen, KeyCode::Char('1'));
        press(&mut screen, KeyCode::Char('4'));
        assert_eq!(screen.selected, 14);
        // 147 is off the pad, so the digit starts over
        press(&mut screen, KeyCode::Char('7'));
        assert_eq!(screen.selected, 7);
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(ScreenAction::Guess(7))
        ));
    }

    #[test]
    fn test_arrows_reach_pass() {
        let mut screen = PlayRoundScreen::new();
        screen.selected = MAX_GUESS;
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.selected, GUESS_PASS);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.selected, GUESS_PASS);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.selected, MAX_GUESS);
    }
}
