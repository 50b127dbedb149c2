use howmanyouts_core::{
    ClientError, Correctness, Feedback, GameInfo, RenderSurface, Round, Scoreboard,
};

/// Something the app should animate on its next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Dealt,
    Scored(Correctness),
}

/// Everything the screens draw, as last pushed by the round controller
#[derive(Debug, Default)]
pub struct TableView {
    pub round: Option<Round>,
    pub feedback: Option<(Feedback, Correctness)>,
    pub game_over: Option<Feedback>,
    pub controls_enabled: bool,
    pub stake: u32,
    pub score: u64,
    pub marks: Vec<(u32, Option<Correctness>)>,
    pub info: Option<GameInfo>,
    pub scoreboard: Option<Scoreboard>,
    pub error: Option<ClientError>,
    cues: Vec<Cue>,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

impl RenderSurface for TableView {
    fn show_cards_face_down(&mut self) {
        self.round = None;
        self.feedback = None;
    }

    fn show_round(&mut self, round: &Round) {
        self.round = Some(round.clone());
        self.feedback = None;
        self.error = None;
        if !self.marks.iter().any(|(id, _)| *id == round.id) {
            self.marks.push((round.id, None));
        }
        self.cues.push(Cue::Dealt);
    }

    fn show_feedback(&mut self, feedback: &Feedback, correctness: Correctness) {
        if let Some(mark) = self.marks.iter_mut().find(|(id, _)| *id == feedback.id) {
            mark.1 = Some(correctness);
        }
        self.feedback = Some((feedback.clone(), correctness));
        self.error = None;
        self.cues.push(Cue::Scored(correctness));
    }

    fn show_game_over(&mut self, feedback: &Feedback) {
        self.game_over = Some(feedback.clone());
    }

    fn set_guess_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    fn update_stake_display(&mut self, stake: u32) {
        self.stake = stake;
    }

    fn update_score_display(&mut self, score: u64) {
        self.score = score;
    }

    fn clear_history(&mut self) {
        self.marks.clear();
        self.game_over = None;
        self.error = None;
    }

    fn show_leaders(&mut self, info: &GameInfo) {
        self.info = Some(info.clone());
    }

    fn show_scoreboard(&mut self, scoreboard: &Scoreboard) {
        self.scoreboard = Some(scoreboard.clone());
    }

    fn show_error(&mut self, error: &ClientError) {
        self.error = Some(error.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use howmanyouts_core::Standing;

    fn round(id: u32) -> Round {
        Round {
            id,
            board: Vec::new(),
            hands: vec![Vec::new()],
            points: 1000,
            standing: Standing::Tied,
            time_budget_ms: 0,
            feedback: None,
        }
    }

    fn feedback(id: u32) -> Feedback {
        Feedback {
            id,
            guess: 4,
            distance: 0,
            outs: Vec::new(),
            draws: 46,
            points: 1000,
            score: 1000,
            rank: None,
            rank_interval: None,
            more: false,
        }
    }

    #[test]
    fn test_marks_follow_rounds_and_feedback() {
        let mut view = TableView::new();
        view.show_round(&round(1));
        view.show_feedback(&feedback(1), Correctness::Perfect);
        view.show_round(&round(2));

        assert_eq!(
            view.marks,
            vec![(1, Some(Correctness::Perfect)), (2, None)]
        );
        assert!(view.feedback.is_none());
        assert_eq!(
            view.take_cues(),
            vec![Cue::Dealt, Cue::Scored(Correctness::Perfect), Cue::Dealt]
        );
        assert!(view.take_cues().is_empty());
    }

    #[test]
    fn test_new_game_clears_table() {
        let mut view = TableView::new();
        view.show_round(&round(1));
        view.show_game_over(&feedback(1));
        view.show_error(&ClientError::transport("refused"));

        view.show_cards_face_down();
        view.clear_history();
        assert!(view.round.is_none());
        assert!(view.marks.is_empty());
        assert!(view.game_over.is_none());
        assert!(view.error.is_none());
    }
}
