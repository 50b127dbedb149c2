use ratatui::layout::Rect;
use ratatui::style::Color;
use tachyonfx::fx;
use tachyonfx::{Effect, EffectManager, Interpolation, Motion};

use howmanyouts_widgets::Theme;

/// Keyed effect manager; re-adding a key replaces the running effect
pub type FxManager = EffectManager<&'static str>;

pub const SCREEN_TRANSITION: &str = "screen_transition";
pub const TITLE_SHIMMER: &str = "title_shimmer";
pub const DEAL: &str = "deal";
pub const STAKE_HIGHLIGHT: &str = "stake_highlight";
pub const CELEBRATION: &str = "celebration";

/// Content sweeps in from the left
pub fn screen_transition() -> Effect {
    fx::sweep_in(
        Motion::LeftToRight,
        8,
        2,
        Theme::BG,
        (400, Interpolation::CubicOut),
    )
}

/// Gold shimmer on the main menu title, forever
pub fn title_shimmer() -> Effect {
    let shift = fx::hsl_shift_fg([15.0, 0.1, 0.1], (1200, Interpolation::SineInOut));
    fx::repeating(fx::ping_pong(shift))
}

/// Fresh cards slide up onto the felt
pub fn card_deal(area: Rect) -> Effect {
    fx::slide_in(
        Motion::DownToUp,
        3,
        1,
        Theme::FELT,
        (350, Interpolation::CubicOut),
    )
    .with_area(area)
}

/// Flash the stake and score when a guess is scored
pub fn stake_highlight(area: Rect) -> Effect {
    let gold: Color = Theme::SCORE_COLOR;
    let to_gold = fx::fade_to_fg(gold, (200, Interpolation::QuadOut));
    let back = fx::fade_from_fg(gold, (600, Interpolation::QuadIn));
    fx::sequence(&[to_gold, back]).with_area(area)
}

/// Hue wobble over the whole table after a perfect guess
pub fn celebration() -> Effect {
    let shift = fx::hsl_shift_fg([30.0, 0.0, 0.15], (800, Interpolation::SineInOut));
    fx::ping_pong(shift)
}
