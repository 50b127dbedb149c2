use crate::error::Result;
use crate::scoreboard::{ScoreScope, Scoreboard};
use crate::wire::{FeedbackReply, RoundReply};

/// What a ticket was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    StartGame,
    SubmitGuess { outs: u32 },
    NextRound,
    SetName,
    HiScores(ScoreScope),
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::StartGame => "start game",
            Request::SubmitGuess { .. } => "guess",
            Request::NextRound => "next round",
            Request::SetName => "set name",
            Request::HiScores(_) => "hi scores",
        }
    }

    /// Requests whose replies mutate the round lifecycle and so must belong
    /// to the current game
    pub fn is_game_flow(&self) -> bool {
        matches!(
            self,
            Request::StartGame | Request::SubmitGuess { .. } | Request::NextRound
        )
    }
}

/// Correlates a reply with the request and game generation that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub request: Request,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Round(RoundReply),
    Feedback(FeedbackReply),
    NameSet,
    Scoreboard(Scoreboard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub ticket: Ticket,
    pub outcome: Result<Reply>,
}

impl Response {
    pub fn new(ticket: Ticket, outcome: Result<Reply>) -> Self {
        Self { ticket, outcome }
    }
}

/// Dispatches requests to the game server.
///
/// Calls return immediately; each produces exactly one [`Response`] carrying
/// the same ticket, delivered later through whatever channel the
/// implementation owns.
pub trait Transport {
    fn start_game(&mut self, ticket: Ticket);
    fn submit_guess(&mut self, ticket: Ticket, outs: u32);
    fn fetch_next_round(&mut self, ticket: Ticket);
    fn set_player_name(&mut self, ticket: Ticket, name: &str);
    fn fetch_hi_scores(&mut self, ticket: Ticket, scope: ScoreScope);
}
