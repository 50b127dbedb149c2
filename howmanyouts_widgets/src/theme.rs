use ratatui::style::Color;

use howmanyouts_core::Correctness;

/// Card-room colour theme for the TUI
pub struct Theme;

impl Theme {
    // Backgrounds
    pub const BG: Color = Color::Rgb(13, 17, 23);
    pub const FELT: Color = Color::Rgb(14, 64, 44);
    pub const PANEL_BG: Color = Color::Rgb(24, 36, 48);

    // Card colors
    pub const CARD_BORDER: Color = Color::Rgb(108, 117, 125);
    pub const CARD_SELECTED: Color = Color::Rgb(255, 214, 10);
    pub const CARD_BACK: Color = Color::Rgb(60, 60, 120);

    // Suit colors
    pub const RED_SUIT: Color = Color::Rgb(230, 57, 70);
    pub const BLACK_SUIT: Color = Color::Rgb(224, 224, 224);

    // Score colors
    pub const STAKE_COLOR: Color = Color::Rgb(76, 201, 240);
    pub const SCORE_COLOR: Color = Color::Rgb(255, 214, 10);
    pub const CLOCK_COLOR: Color = Color::Rgb(230, 57, 70);

    // Guess verdicts
    pub const PERFECT: Color = Color::Rgb(6, 214, 160);
    pub const CLOSE: Color = Color::Rgb(255, 183, 3);
    pub const WRONG: Color = Color::Rgb(230, 57, 70);
    pub const PASS: Color = Color::Rgb(160, 160, 180);
    pub const PENDING: Color = Color::Rgb(60, 60, 80);

    // UI elements
    pub const GOLD: Color = Color::Rgb(255, 183, 3);
    pub const DIM_TEXT: Color = Color::Rgb(100, 100, 120);
    pub const BRIGHT_TEXT: Color = Color::Rgb(255, 255, 255);
    pub const MUTED_TEXT: Color = Color::Rgb(160, 160, 180);

    pub fn correctness(mark: Option<Correctness>) -> Color {
        match mark {
            Some(Correctness::Perfect) => Self::PERFECT,
            Some(Correctness::Close) => Self::CLOSE,
            Some(Correctness::Wrong) => Self::WRONG,
            Some(Correctness::Pass) => Self::PASS,
            None => Self::PENDING,
        }
    }
}
