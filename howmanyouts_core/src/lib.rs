pub mod card;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod format;
pub mod history;
pub mod round;
pub mod scoreboard;
pub mod surface;
pub mod transport;
pub mod wire;

pub use card::{CardToken, Hand, Rank, Suit};
pub use controller::{RoundController, RoundPhase};
pub use countdown::{Countdown, CountdownLedger, TICK_QUANTUM};
pub use error::ClientError;
pub use history::RoundHistory;
pub use round::{classify, Correctness, Feedback, Round, Standing, GUESS_EXPIRED, GUESS_PASS};
pub use scoreboard::{GameInfo, Leader, ScoreEntry, ScoreScope, Scoreboard};
pub use surface::RenderSurface;
pub use transport::{Reply, Request, Response, Ticket, Transport};
pub use wire::{FeedbackReply, RoundReply};
