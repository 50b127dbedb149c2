use tracing::{debug, info, warn};

use crate::countdown::{Countdown, CountdownLedger, TickOutcome};
use crate::error::ClientError;
use crate::history::{AttachError, RoundHistory};
use crate::round::{classify, Feedback, Round, GUESS_EXPIRED};
use crate::scoreboard::{GameInfo, ScoreScope};
use crate::surface::RenderSurface;
use crate::transport::{Reply, Request, Response, Ticket, Transport};
use crate::wire::{FeedbackReply, RoundReply};

/// Longest player name the server keeps
pub const MAX_NAME_LEN: usize = 32;

/// Where the current game is in its round cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// No game started yet
    Idle,
    /// A new round has been requested
    AwaitingRound,
    /// Cards are on the table and a guess is accepted
    Guessing { round_id: u32 },
    /// The guess is in flight
    AwaitingFeedback { round_id: u32 },
    /// Feedback is shown; another round follows
    Reviewing { round_id: u32 },
    /// The last feedback said no round follows
    Ended,
}

/// Owns the state of one game session and drives the table through it.
///
/// Collaborators are borrowed per call so one transport and surface can be
/// shared with the rest of the client.
#[derive(Debug)]
pub struct RoundController {
    rounds: RoundHistory,
    phase: RoundPhase,
    countdown: Option<Countdown>,
    ledger: CountdownLedger,
    generation: u64,
    score: u64,
    info: Option<GameInfo>,
    last_feedback: Option<Feedback>,
    retry: Option<Request>,
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundController {
    pub fn new() -> Self {
        Self {
            rounds: RoundHistory::new(),
            phase: RoundPhase::Idle,
            countdown: None,
            ledger: CountdownLedger::default(),
            generation: 0,
            score: 0,
            info: None,
            last_feedback: None,
            retry: None,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn rounds(&self) -> &RoundHistory {
        &self.rounds
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn game_ended(&self) -> bool {
        self.phase == RoundPhase::Ended
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn ledger(&self) -> CountdownLedger {
        self.ledger
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn info(&self) -> Option<&GameInfo> {
        self.info.as_ref()
    }

    /// The request a retry would re-issue, if the last one failed
    pub fn pending_retry(&self) -> Option<Request> {
        self.retry
    }

    /// A finished round with its feedback. Only available once the game is over.
    pub fn review(&self, id: u32) -> Option<&Round> {
        if !self.game_ended() {
            return None;
        }
        self.rounds.get(id).filter(|r| r.is_guessed())
    }

    /// Text to share a finished game
    pub fn share_text(&self, base_url: &str) -> Option<String> {
        if !self.game_ended() {
            return None;
        }
        let fb = self.last_feedback.as_ref()?;
        let rank = fb
            .rank
            .map(|r| format!(" (rank #{})", r))
            .unwrap_or_default();
        Some(format!(
            "I scored {} on How Many Outs{}. {}",
            crate::format::group_digits(fb.score as i64),
            rank,
            base_url
        ))
    }

    fn ticket(&self, request: Request) -> Ticket {
        Ticket {
            generation: self.generation,
            request,
        }
    }

    // ─── Countdown ───────────────────────────────────────────────────────

    fn arm(&mut self, countdown: Countdown) {
        self.disarm();
        debug!(
            round = countdown.round_id,
            budget_ms = countdown.total_ms,
            "countdown armed"
        );
        self.countdown = Some(countdown);
        self.ledger.armed += 1;
    }

    fn disarm(&mut self) {
        if self.countdown.take().is_some() {
            self.ledger.disarmed += 1;
        }
    }

    /// Advance the countdown by one quantum. Running out of time submits a
    /// forced pass, since the server ignores late guesses anyway.
    pub fn tick(&mut self, transport: &mut dyn Transport, surface: &mut dyn RenderSurface) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };

        match countdown.tick() {
            TickOutcome::Running { stake } => surface.update_stake_display(stake),
            TickOutcome::Expired => {
                let round_id = countdown.round_id;
                self.disarm();
                surface.update_stake_display(0);
                info!(round = round_id, "round timed out, forcing pass");
                self.submit_guess(GUESS_EXPIRED, transport, surface);
            }
        }
    }

    // ─── Round lifecycle ─────────────────────────────────────────────────

    /// Throw away the current game and ask for a new one.
    pub fn start_game(&mut self, transport: &mut dyn Transport, surface: &mut dyn RenderSurface) {
        self.disarm();
        self.rounds.clear();
        self.generation += 1;
        self.score = 0;
        self.last_feedback = None;
        self.retry = None;
        self.phase = RoundPhase::AwaitingRound;

        // Reset the table before the server answers
        surface.show_cards_face_down();
        surface.clear_history();
        surface.set_guess_controls_enabled(false);
        surface.update_score_display(0);
        surface.update_stake_display(0);

        info!(generation = self.generation, "starting new game");
        transport.start_game(self.ticket(Request::StartGame));
    }

    pub fn on_round_received(&mut self, reply: RoundReply, surface: &mut dyn RenderSurface) {
        let RoundReply { info, round } = reply;

        if self.game_ended() {
            debug!(round = round.id, "round arrived after game end, ignoring");
            return;
        }
        if self.rounds.contains(round.id) {
            warn!(round = round.id, "duplicate round id, ignoring");
            return;
        }

        surface.show_leaders(&info);
        self.info = Some(info);

        // The opening round has no clock; every later one decays
        self.disarm();
        if round.id > 1 && round.time_budget_ms > 0 {
            self.arm(Countdown::new(round.id, round.time_budget_ms, round.points));
        }

        surface.show_round(&round);
        surface.set_guess_controls_enabled(true);
        surface.update_stake_display(round.points);

        debug!(round = round.id, points = round.points, "round on the table");
        self.phase = RoundPhase::Guessing { round_id: round.id };
        self.rounds.insert(round);
    }

    /// Lock in a guess for the round on the table. Ignored unless a guess is
    /// currently being accepted.
    pub fn submit_guess(
        &mut self,
        outs: u32,
        transport: &mut dyn Transport,
        surface: &mut dyn RenderSurface,
    ) {
        let RoundPhase::Guessing { round_id } = self.phase else {
            debug!(outs, phase = ?self.phase, "guess ignored");
            return;
        };

        self.disarm();
        surface.set_guess_controls_enabled(false);
        self.phase = RoundPhase::AwaitingFeedback { round_id };

        debug!(round = round_id, outs, "submitting guess");
        transport.submit_guess(self.ticket(Request::SubmitGuess { outs }), outs);
    }

    pub fn on_feedback_received(&mut self, reply: FeedbackReply, surface: &mut dyn RenderSurface) {
        let FeedbackReply { info, feedback } = reply;

        if self.game_ended() {
            debug!(round = feedback.id, "feedback arrived after game end, ignoring");
            return;
        }

        match self.rounds.attach(feedback.clone()) {
            Ok(_) => {}
            Err(AttachError::UnknownRound) => {
                warn!(round = feedback.id, "feedback for unknown round, ignoring");
                return;
            }
            Err(AttachError::AlreadyAttached) => {
                warn!(round = feedback.id, "round already has feedback, ignoring");
                return;
            }
        }

        self.disarm();
        self.info = Some(info);
        self.score = feedback.score;

        let correctness = classify(feedback.guess, feedback.distance);
        info!(
            round = feedback.id,
            guess = feedback.guess,
            distance = feedback.distance,
            %correctness,
            "feedback received"
        );

        surface.show_feedback(&feedback, correctness);
        surface.update_stake_display(feedback.points);
        surface.update_score_display(feedback.score);

        if feedback.more {
            self.phase = RoundPhase::Reviewing {
                round_id: feedback.id,
            };
        } else {
            self.phase = RoundPhase::Ended;
            surface.set_guess_controls_enabled(false);
            surface.show_game_over(&feedback);
            info!(score = feedback.score, rank = ?feedback.rank, "game over");
        }
        self.last_feedback = Some(feedback);
    }

    /// Ask for the next round once feedback for the current one is shown.
    pub fn request_next_round(
        &mut self,
        transport: &mut dyn Transport,
        surface: &mut dyn RenderSurface,
    ) {
        if !matches!(self.phase, RoundPhase::Reviewing { .. }) {
            debug!(phase = ?self.phase, "next round ignored");
            return;
        }

        self.phase = RoundPhase::AwaitingRound;
        surface.show_cards_face_down();
        transport.fetch_next_round(self.ticket(Request::NextRound));
    }

    // ─── Side requests ───────────────────────────────────────────────────

    /// Trim and shorten a name the way the server stores it. Returns the name
    /// sent, or `None` if nothing was left.
    pub fn set_player_name(&mut self, name: &str, transport: &mut dyn Transport) -> Option<String> {
        let name: String = name.trim().chars().take(MAX_NAME_LEN).collect();
        if name.is_empty() {
            return None;
        }
        transport.set_player_name(self.ticket(Request::SetName), &name);
        Some(name)
    }

    pub fn fetch_hi_scores(&mut self, scope: ScoreScope, transport: &mut dyn Transport) {
        transport.fetch_hi_scores(self.ticket(Request::HiScores(scope)), scope);
    }

    // ─── Replies ─────────────────────────────────────────────────────────

    /// Apply a transport reply. Replies from an earlier game are dropped.
    pub fn handle(&mut self, response: Response, surface: &mut dyn RenderSurface) {
        let Response { ticket, outcome } = response;

        if ticket.request.is_game_flow() && ticket.generation != self.generation {
            let stale = ClientError::StaleResponse {
                request: ticket.request.name(),
                generation: ticket.generation,
            };
            debug!(%stale, current = self.generation, "dropping reply");
            return;
        }

        match outcome {
            Ok(Reply::Round(reply)) => {
                self.retry = None;
                self.on_round_received(reply, surface);
            }
            Ok(Reply::Feedback(reply)) => {
                self.retry = None;
                self.on_feedback_received(reply, surface);
            }
            Ok(Reply::NameSet) => debug!("player name saved"),
            Ok(Reply::Scoreboard(board)) => surface.show_scoreboard(&board),
            Err(err) => self.on_failure(ticket.request, err, surface),
        }
    }

    fn on_failure(&mut self, request: Request, err: ClientError, surface: &mut dyn RenderSurface) {
        warn!(request = request.name(), error = %err, "request failed");

        match request {
            Request::SubmitGuess { .. } => {
                // Give the guess back to the player; the clock stays stopped
                if let RoundPhase::AwaitingFeedback { round_id } = self.phase {
                    self.phase = RoundPhase::Guessing { round_id };
                    surface.set_guess_controls_enabled(true);
                }
            }
            Request::StartGame | Request::NextRound => {}
            Request::SetName | Request::HiScores(_) => {
                surface.show_error(&err);
                return;
            }
        }

        if err.is_retryable() {
            self.retry = Some(request);
        }
        surface.show_error(&err);
    }

    /// Re-issue the request that last failed with a retryable error.
    pub fn retry(&mut self, transport: &mut dyn Transport, surface: &mut dyn RenderSurface) {
        let Some(request) = self.retry.take() else {
            return;
        };
        info!(request = request.name(), "retrying");

        match request {
            Request::StartGame => self.start_game(transport, surface),
            Request::NextRound if self.phase == RoundPhase::AwaitingRound => {
                transport.fetch_next_round(self.ticket(Request::NextRound));
            }
            Request::SubmitGuess { outs } => self.submit_guess(outs, transport, surface),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardToken;
    use crate::round::{Correctness, Standing};
    use crate::scoreboard::Scoreboard;

    #[derive(Default)]
    struct Recorder {
        sent: Vec<(Ticket, Option<u32>)>,
    }

    impl Transport for Recorder {
        fn start_game(&mut self, ticket: Ticket) {
            self.sent.push((ticket, None));
        }
        fn submit_guess(&mut self, ticket: Ticket, outs: u32) {
            self.sent.push((ticket, Some(outs)));
        }
        fn fetch_next_round(&mut self, ticket: Ticket) {
            self.sent.push((ticket, None));
        }
        fn set_player_name(&mut self, ticket: Ticket, _name: &str) {
            self.sent.push((ticket, None));
        }
        fn fetch_hi_scores(&mut self, ticket: Ticket, _scope: ScoreScope) {
            self.sent.push((ticket, None));
        }
    }

    #[derive(Default)]
    struct Table {
        stake: u32,
        score: u64,
        controls: bool,
        errors: Vec<ClientError>,
        game_over: bool,
        marks: Vec<Correctness>,
    }

    impl RenderSurface for Table {
        fn show_cards_face_down(&mut self) {}
        fn show_round(&mut self, _round: &Round) {}
        fn show_feedback(&mut self, _feedback: &Feedback, correctness: Correctness) {
            self.marks.push(correctness);
        }
        fn show_game_over(&mut self, _feedback: &Feedback) {
            self.game_over = true;
        }
        fn set_guess_controls_enabled(&mut self, enabled: bool) {
            self.controls = enabled;
        }
        fn update_stake_display(&mut self, stake: u32) {
            self.stake = stake;
        }
        fn update_score_display(&mut self, score: u64) {
            self.score = score;
        }
        fn clear_history(&mut self) {
            self.marks.clear();
        }
        fn show_leaders(&mut self, _info: &GameInfo) {}
        fn show_scoreboard(&mut self, _scoreboard: &Scoreboard) {}
        fn show_error(&mut self, error: &ClientError) {
            self.errors.push(error.clone());
        }
    }

    fn round(id: u32, budget_ms: u64, points: u32) -> RoundReply {
        let c = |s: &str| s.parse::<CardToken>().unwrap();
        RoundReply {
            info: GameInfo::default(),
            round: Round {
                id,
                board: vec![c("2c"), c("7d"), c("9h"), c("Ks")],
                hands: vec![vec![c("Ah"), c("Ad")], vec![c("Qs"), c("Js")]],
                points,
                standing: Standing::Ahead,
                time_budget_ms: budget_ms,
                feedback: None,
            },
        }
    }

    fn feedback(id: u32, distance: i32, more: bool) -> FeedbackReply {
        FeedbackReply {
            info: GameInfo::default(),
            feedback: Feedback {
                id,
                guess: 8,
                distance,
                outs: Vec::new(),
                draws: 44,
                points: 500,
                score: 500,
                rank: None,
                rank_interval: None,
                more,
            },
        }
    }

    #[test]
    fn test_first_round_has_no_countdown() {
        let (mut t, mut s) = (Recorder::default(), Table::default());
        let mut ctrl = RoundController::new();
        ctrl.start_game(&mut t, &mut s);
        ctrl.on_round_received(round(1, 60_000, 1000), &mut s);
        assert!(ctrl.countdown().is_none());
        assert_eq!(s.stake, 1000);
        assert!(s.controls);
    }

    #[test]
    fn test_later_round_counts_down() {
        let (mut t, mut s) = (Recorder::default(), Table::default());
        let mut ctrl = RoundController::new();
        ctrl.start_game(&mut t, &mut s);
        ctrl.on_round_received(round(1, 0, 1000), &mut s);
        ctrl.submit_guess(8, &mut t, &mut s);
        ctrl.on_feedback_received(feedback(1, 0, true), &mut s);
        ctrl.request_next_round(&mut t, &mut s);
        ctrl.on_round_received(round(2, 5000, 20), &mut s);

        for _ in 0..10 {
            ctrl.tick(&mut t, &mut s);
        }
        assert_eq!(s.stake, 16);
    }

    #[test]
    fn test_expiry_forces_pass() {
        let (mut t, mut s) = (Recorder::default(), Table::default());
        let mut ctrl = RoundController::new();
        ctrl.start_game(&mut t, &mut s);
        ctrl.on_round_received(round(2, 300, 900), &mut s);
        for _ in 0..3 {
            ctrl.tick(&mut t, &mut s);
        }
        let (ticket, outs) = t.sent.last().copied().unwrap();
        assert_eq!(outs, Some(GUESS_EXPIRED));
        assert_eq!(
            ticket.request,
            Request::SubmitGuess {
                outs: GUESS_EXPIRED
            }
        );
        assert!(ctrl.countdown().is_none());
        assert!(!s.controls);

        // Ticking a disarmed controller does nothing
        ctrl.tick(&mut t, &mut s);
        assert_eq!(t.sent.len(), 2);
    }

    #[test]
    fn test_stale_round_is_dropped() {
        let (mut t, mut s) = (Recorder::default(), Table::default());
        let mut ctrl = RoundController::new();
        ctrl.start_game(&mut t, &mut s);
        let old = t.sent[0].0;
        ctrl.start_game(&mut t, &mut s);

        ctrl.handle(Response::new(old, Ok(Reply::Round(round(1, 0, 1000)))), &mut s);
        assert!(ctrl.rounds().is_empty());

        let current = t.sent[1].0;
        ctrl.handle(Response::new(current, Ok(Reply::Round(round(1, 0, 1000)))), &mut s);
        assert_eq!(ctrl.rounds().ids(), vec![1]);
    }

    #[test]
    fn test_failed_guess_can_be_retried() {
        let (mut t, mut s) = (Recorder::default(), Table::default());
        let mut ctrl = RoundController::new();
        ctrl.start_game(&mut t, &mut s);
        ctrl.on_round_received(round(1, 0, 1000), &mut s);
        ctrl.submit_guess(6, &mut t, &mut s);
        let ticket = t.sent.last().unwrap().0;

        ctrl.handle(
            Response::new(ticket, Err(ClientError::transport("connection reset"))),
            &mut s,
        );
        assert_eq!(ctrl.phase(), RoundPhase::Guessing { round_id: 1 });
        assert!(s.controls);
        assert_eq!(s.errors.len(), 1);
        assert_eq!(ctrl.pending_retry(), Some(Request::SubmitGuess { outs: 6 }));

        ctrl.retry(&mut t, &mut s);
        assert_eq!(t.sent.last().unwrap().1, Some(6));
        assert_eq!(ctrl.phase(), RoundPhase::AwaitingFeedback { round_id: 1 });
    }

    #[test]
    fn test_next_round_waits_for_feedback() {
        let (mut t, mut s) = (Recorder::default(), Table::default());
        let mut ctrl = RoundController::new();
        ctrl.start_game(&mut t, &mut s);
        ctrl.on_round_received(round(1, 0, 1000), &mut s);
        ctrl.request_next_round(&mut t, &mut s);
        assert_eq!(t.sent.len(), 1);
    }

    #[test]
    fn test_player_name_is_trimmed_and_truncated() {
        let mut t = Recorder::default();
        let mut ctrl = RoundController::new();
        let long = format!("  {}  ", "x".repeat(40));
        assert_eq!(ctrl.set_player_name(&long, &mut t).unwrap().len(), MAX_NAME_LEN);
        assert_eq!(ctrl.set_player_name("   ", &mut t), None);
        assert_eq!(t.sent.len(), 1);
    }

    #[test]
    fn test_share_text_after_game_over() {
        let (mut t, mut s) = (Recorder::default(), Table::default());
        let mut ctrl = RoundController::new();
        ctrl.start_game(&mut t, &mut s);
        ctrl.on_round_received(round(1, 0, 1000), &mut s);
        assert_eq!(ctrl.share_text("http://howmanyouts.com"), None);
        ctrl.submit_guess(8, &mut t, &mut s);
        let mut last = feedback(1, 0, false);
        last.feedback.score = 31500;
        last.feedback.rank = Some(3);
        ctrl.on_feedback_received(last, &mut s);
        assert_eq!(
            ctrl.share_text("http://howmanyouts.com").unwrap(),
            "I scored 31,500 on How Many Outs (rank #3). http://howmanyouts.com"
        );
    }
}
