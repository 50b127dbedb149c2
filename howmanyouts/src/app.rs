use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use howmanyouts_core::{
    Correctness, Response, RoundController, RoundPhase, Transport, TICK_QUANTUM,
};

use crate::effects::{self, FxManager};
use crate::screens::game_over::GameOverScreen;
use crate::screens::hi_scores::HiScoresScreen;
use crate::screens::main_menu::MainMenuScreen;
use crate::screens::name_entry::NameEntryScreen;
use crate::screens::play_round::PlayRoundScreen;
use crate::screens::Screen;
use crate::view::{Cue, TableView};

/// Event poll interval, ~30fps
pub const FRAME: Duration = Duration::from_millis(33);

/// Top-level client phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    MainMenu,
    Playing,
    NameEntry,
    HiScores,
    GameOver,
}

/// Main application state
pub struct App {
    pub phase: AppPhase,
    pub game: RoundController,
    pub view: TableView,
    pub fx: FxManager,
    pub player_name: Option<String>,
    transport: Box<dyn Transport>,
    replies: UnboundedReceiver<Response>,
    clock: Duration,
    prev_phase: Option<AppPhase>,
    /// Where Esc leaves the hi scores and name screens
    return_phase: AppPhase,

    // Screens
    pub main_menu: MainMenuScreen,
    pub play_round: PlayRoundScreen,
    pub game_over: GameOverScreen,
    pub hi_scores: HiScoresScreen,
    pub name_entry: NameEntryScreen,
}

impl App {
    pub fn new(
        transport: Box<dyn Transport>,
        replies: UnboundedReceiver<Response>,
        share_url: impl Into<String>,
    ) -> Self {
        let mut fx = FxManager::default();
        fx.add_unique_effect(effects::TITLE_SHIMMER, effects::title_shimmer());

        Self {
            phase: AppPhase::MainMenu,
            game: RoundController::new(),
            view: TableView::new(),
            fx,
            player_name: None,
            transport,
            replies,
            clock: Duration::ZERO,
            prev_phase: None,
            return_phase: AppPhase::MainMenu,
            main_menu: MainMenuScreen::new(),
            play_round: PlayRoundScreen::new(),
            game_over: GameOverScreen::new(share_url),
            hi_scores: HiScoresScreen::new(),
            name_entry: NameEntryScreen::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        match self.phase {
            AppPhase::MainMenu => self.main_menu.render(frame, &self.view, &self.game),
            AppPhase::Playing => self.play_round.render(frame, &self.view, &self.game),
            AppPhase::NameEntry => self.name_entry.render(frame, &self.view, &self.game),
            AppPhase::HiScores => self.hi_scores.render(frame, &self.view, &self.game),
            AppPhase::GameOver => self.game_over.render(frame, &self.view, &self.game),
        }

        // Apply all tachyonfx effects on top of rendered content
        let tick_duration = tachyonfx::Duration::from_millis(33);
        let buf = frame.buffer_mut();
        self.fx.process_effects(tick_duration, buf, area);
    }

    /// Handle key event. Returns true if should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('q') && self.phase == AppPhase::MainMenu {
            return true;
        }

        // An error banner takes Retry/Dismiss before the screen sees the key
        if self.view.error.is_some() {
            match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    return self.process_action(Some(ScreenAction::Retry));
                }
                KeyCode::Esc => return self.process_action(Some(ScreenAction::DismissError)),
                _ => {}
            }
        }

        let action = match self.phase {
            AppPhase::MainMenu => self.main_menu.handle_key(key),
            AppPhase::Playing => self.play_round.handle_key(key),
            AppPhase::NameEntry => self.name_entry.handle_key(key),
            AppPhase::HiScores => self.hi_scores.handle_key(key),
            AppPhase::GameOver => self.game_over.handle_key(key),
        };

        self.process_action(action)
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.phase == AppPhase::Playing {
            let action = self.play_round.handle_mouse(mouse);
            self.process_action(action);
        }
    }

    /// Apply server replies, advance the round clock by `elapsed` and start
    /// whatever effects the table asked for.
    pub fn tick(&mut self, elapsed: Duration) {
        while let Ok(response) = self.replies.try_recv() {
            self.game.handle(response, &mut self.view);
        }

        self.clock += elapsed;
        while self.clock >= TICK_QUANTUM {
            self.clock -= TICK_QUANTUM;
            self.game.tick(self.transport.as_mut(), &mut self.view);
        }

        if self.game.game_ended() && self.phase == AppPhase::Playing {
            self.game_over.cursor = self.game.rounds().latest().map(|r| r.id);
            self.phase = AppPhase::GameOver;
        }

        for cue in self.view.take_cues() {
            match cue {
                Cue::Dealt => self
                    .fx
                    .add_unique_effect(effects::DEAL, effects::card_deal(self.play_round.table_rect)),
                Cue::Scored(correctness) => {
                    self.fx.add_unique_effect(
                        effects::STAKE_HIGHLIGHT,
                        effects::stake_highlight(self.play_round.hud_rect),
                    );
                    if correctness == Correctness::Perfect {
                        self.fx
                            .add_unique_effect(effects::CELEBRATION, effects::celebration());
                    }
                }
            }
        }

        // Detect phase changes and trigger transition effects
        if self.prev_phase != Some(self.phase) {
            self.fx
                .add_unique_effect(effects::SCREEN_TRANSITION, effects::screen_transition());
            if self.phase == AppPhase::MainMenu {
                self.fx
                    .add_unique_effect(effects::TITLE_SHIMMER, effects::title_shimmer());
            } else {
                self.fx.cancel_unique_effect(effects::TITLE_SHIMMER);
            }
            self.prev_phase = Some(self.phase);
        }
    }

    /// Send a name picked outside the UI, e.g. from the command line.
    pub fn set_player_name(&mut self, name: &str) {
        if let Some(name) = self.game.set_player_name(name, self.transport.as_mut()) {
            self.player_name = Some(name);
        }
    }

    fn open_overlay(&mut self, phase: AppPhase) {
        if !matches!(self.phase, AppPhase::HiScores | AppPhase::NameEntry) {
            self.return_phase = self.phase;
        }
        self.phase = phase;
    }

    fn fetch_hi_scores(&mut self) {
        self.view.scoreboard = None;
        self.game
            .fetch_hi_scores(self.hi_scores.scope, self.transport.as_mut());
    }

    /// Process a screen action. Returns true if should quit.
    fn process_action(&mut self, action: Option<ScreenAction>) -> bool {
        let Some(action) = action else {
            return false;
        };
        debug!(?action, phase = ?self.phase, "screen action");

        match action {
            ScreenAction::Quit => return true,
            ScreenAction::NewGame => {
                self.play_round.reset();
                self.game_over.cursor = None;
                self.game.start_game(self.transport.as_mut(), &mut self.view);
                self.phase = AppPhase::Playing;
            }
            ScreenAction::Resume => {
                if !matches!(self.game.phase(), RoundPhase::Idle | RoundPhase::Ended) {
                    self.phase = AppPhase::Playing;
                }
            }
            ScreenAction::Guess(outs) => {
                self.game
                    .submit_guess(outs, self.transport.as_mut(), &mut self.view);
            }
            ScreenAction::NextRound => {
                self.game
                    .request_next_round(self.transport.as_mut(), &mut self.view);
            }
            ScreenAction::Retry => {
                self.view.dismiss_error();
                self.game.retry(self.transport.as_mut(), &mut self.view);
            }
            ScreenAction::DismissError => self.view.dismiss_error(),
            ScreenAction::ShowHiScores => {
                self.open_overlay(AppPhase::HiScores);
                self.fetch_hi_scores();
            }
            ScreenAction::ToggleScope => {
                self.hi_scores.scope = self.hi_scores.scope.toggle();
                self.fetch_hi_scores();
            }
            ScreenAction::EditName => {
                let current = self
                    .player_name
                    .clone()
                    .or_else(|| self.game.info().map(|i| i.player_name.clone()))
                    .unwrap_or_default();
                self.name_entry.reset(&current);
                self.open_overlay(AppPhase::NameEntry);
            }
            ScreenAction::SubmitName(name) => {
                self.set_player_name(&name);
                self.phase = self.return_phase;
            }
            ScreenAction::Back => self.phase = self.return_phase,
            ScreenAction::BackToMenu => self.phase = AppPhase::MainMenu,
            ScreenAction::ReviewStep { forward } => {
                let rounds = self.game.rounds();
                let from = self
                    .game_over
                    .cursor
                    .or_else(|| rounds.latest().map(|r| r.id));
                if let Some(next) = from.and_then(|id| rounds.neighbor(id, forward)) {
                    if self.game.review(next).is_some() {
                        self.game_over.cursor = Some(next);
                    }
                }
            }
        }

        false
    }
}

/// Actions that screens can return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    Quit,
    NewGame,
    Resume,
    /// Lock in an outs guess; `GUESS_PASS` passes
    Guess(u32),
    NextRound,
    Retry,
    DismissError,
    ShowHiScores,
    ToggleScope,
    EditName,
    SubmitName(String),
    /// Leave hi scores or name entry for wherever they were opened from
    Back,
    BackToMenu,
    ReviewStep { forward: bool },
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crossterm::event::KeyModifiers;
    use howmanyouts_core::{
        ClientError, Feedback, FeedbackReply, GameInfo, Reply, Request, Round, RoundReply,
        ScoreScope, Standing, Ticket,
    };
    use tokio::sync::mpsc::{self, UnboundedSender};

    use super::*;

    #[derive(Clone, Default)]
    struct SharedLog(Arc<Mutex<Vec<(Ticket, Option<u32>)>>>);

    impl SharedLog {
        fn last(&self) -> (Ticket, Option<u32>) {
            *self.0.lock().unwrap().last().unwrap()
        }
        fn len(&self) -> usize {
            self.0.lock().unwrap().len()
        }
    }

    impl Transport for SharedLog {
        fn start_game(&mut self, ticket: Ticket) {
            self.0.lock().unwrap().push((ticket, None));
        }
        fn submit_guess(&mut self, ticket: Ticket, outs: u32) {
            self.0.lock().unwrap().push((ticket, Some(outs)));
        }
        fn fetch_next_round(&mut self, ticket: Ticket) {
            self.0.lock().unwrap().push((ticket, None));
        }
        fn set_player_name(&mut self, ticket: Ticket, _name: &str) {
            self.0.lock().unwrap().push((ticket, None));
        }
        fn fetch_hi_scores(&mut self, ticket: Ticket, _scope: ScoreScope) {
            self.0.lock().unwrap().push((ticket, None));
        }
    }

    fn app() -> (App, SharedLog, UnboundedSender<Response>) {
        let log = SharedLog::default();
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(Box::new(log.clone()), rx, "http://localhost:5000/");
        (app, log, tx)
    }

    fn key(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn round(id: u32) -> Reply {
        Reply::Round(RoundReply {
            info: GameInfo::default(),
            round: Round {
                id,
                board: ["2c", "7d", "9h", "Ks"].iter().map(|c| c.parse().unwrap()).collect(),
                hands: vec![
                    vec!["Ah".parse().unwrap(), "Ad".parse().unwrap()],
                    vec!["Qs".parse().unwrap(), "Js".parse().unwrap()],
                ],
                points: 1000,
                standing: Standing::Behind,
                time_budget_ms: 30_000,
                feedback: None,
            },
        })
    }

    fn feedback(id: u32, guess: u32, more: bool) -> Reply {
        Reply::Feedback(FeedbackReply {
            info: GameInfo::default(),
            feedback: Feedback {
                id,
                guess,
                distance: 0,
                outs: Vec::new(),
                draws: 44,
                points: 1000,
                score: 1000 * id as u64,
                rank: Some(4),
                rank_interval: Some(1),
                more,
            },
        })
    }

    #[test]
    fn test_game_plays_through_to_review() {
        let (mut app, log, tx) = app();
        assert!(!key(&mut app, KeyCode::Enter));
        assert_eq!(app.phase, AppPhase::Playing);
        assert_eq!(log.last().0.request, Request::StartGame);

        for id in 1..=2 {
            tx.send(Response::new(log.last().0, Ok(round(id)))).unwrap();
            app.tick(Duration::ZERO);
            assert_eq!(app.view.round.as_ref().map(|r| r.id), Some(id));

            key(&mut app, KeyCode::Char('8'));
            key(&mut app, KeyCode::Enter);
            assert_eq!(log.last().1, Some(8));

            tx.send(Response::new(log.last().0, Ok(feedback(id, 8, id < 2))))
                .unwrap();
            app.tick(Duration::ZERO);
            key(&mut app, KeyCode::Char('n'));
        }

        app.tick(Duration::ZERO);
        assert_eq!(app.phase, AppPhase::GameOver);
        assert_eq!(app.game_over.cursor, Some(2));
        key(&mut app, KeyCode::Left);
        assert_eq!(app.game_over.cursor, Some(1));
        key(&mut app, KeyCode::Left);
        assert_eq!(app.game_over.cursor, Some(1));
    }

    #[test]
    fn test_clock_runs_in_quanta() {
        let (mut app, log, tx) = app();
        key(&mut app, KeyCode::Enter);
        let mut reply = round(2);
        if let Reply::Round(r) = &mut reply {
            r.round.time_budget_ms = 1000;
        }
        tx.send(Response::new(log.last().0, Ok(reply))).unwrap();
        app.tick(Duration::ZERO);
        assert_eq!(app.view.stake, 1000);

        app.tick(Duration::from_millis(250));
        assert_eq!(app.view.stake, 800);
        app.tick(Duration::from_millis(50));
        assert_eq!(app.view.stake, 700);
    }

    #[test]
    fn test_error_banner_takes_retry() {
        let (mut app, log, tx) = app();
        key(&mut app, KeyCode::Enter);
        let first = log.last().0;
        tx.send(Response::new(first, Err(ClientError::transport("refused"))))
            .unwrap();
        app.tick(Duration::ZERO);
        assert!(app.view.error.is_some());

        key(&mut app, KeyCode::Char('r'));
        assert!(app.view.error.is_none());
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().0.generation, first.generation + 1);
    }

    #[test]
    fn test_hi_scores_return_to_game() {
        let (mut app, log, _tx) = app();
        key(&mut app, KeyCode::Enter);
        key(&mut app, KeyCode::Char('H'));
        assert_eq!(app.phase, AppPhase::HiScores);
        assert_eq!(
            log.last().0.request,
            Request::HiScores(ScoreScope::AllTime)
        );

        key(&mut app, KeyCode::Tab);
        assert_eq!(
            log.last().0.request,
            Request::HiScores(ScoreScope::Interval)
        );
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.phase, AppPhase::Playing);
    }
}
