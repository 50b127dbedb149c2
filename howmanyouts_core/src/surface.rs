use crate::error::ClientError;
use crate::round::{Correctness, Feedback, Round};
use crate::scoreboard::{GameInfo, Scoreboard};

/// Whatever draws the table. The controller pushes every visible change
/// through this trait and never reads anything back.
pub trait RenderSurface {
    /// Neutral table: every card slot face down, no outs shown
    fn show_cards_face_down(&mut self);
    fn show_round(&mut self, round: &Round);
    fn show_feedback(&mut self, feedback: &Feedback, correctness: Correctness);
    fn show_game_over(&mut self, feedback: &Feedback);
    fn set_guess_controls_enabled(&mut self, enabled: bool);
    fn update_stake_display(&mut self, stake: u32);
    fn update_score_display(&mut self, score: u64);
    fn clear_history(&mut self);
    fn show_leaders(&mut self, info: &GameInfo);
    fn show_scoreboard(&mut self, scoreboard: &Scoreboard);
    fn show_error(&mut self, error: &ClientError);
}
