pub mod card;
pub mod guess_pad;
pub mod hand;
pub mod history;
pub mod hud;
pub mod outs;
pub mod popup;
pub mod scoreboard;
pub mod theme;

pub use theme::Theme;
