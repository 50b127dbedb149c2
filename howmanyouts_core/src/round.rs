use std::fmt;

use crate::card::{CardToken, Hand};

/// Guess value the player sends to pass on a round.
pub const GUESS_PASS: u32 = 100;

/// Guess value sent automatically when the round's time budget runs out.
pub const GUESS_EXPIRED: u32 = 101;

/// Guesses closer than this to the real outs count still score.
pub const GUESS_MARGIN: i32 = 2;

/// Where the player's hand stands against the best opponent after the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Ahead,
    Tied,
    Behind,
}

impl Standing {
    /// The question the player is answering this round
    pub fn prompt(&self) -> &'static str {
        match self {
            Standing::Ahead => "You are ahead.  How many ways can you lose?",
            Standing::Tied => "You are tied.  How many ways can you lose?",
            Standing::Behind => "You are behind.  How many ways can you win?",
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Standing::Ahead => "Ahead",
            Standing::Tied => "Tied",
            Standing::Behind => "Behind",
        };
        write!(f, "{}", name)
    }
}

/// One dealt hand presented for an outs guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub id: u32,
    pub board: Vec<CardToken>,
    pub hands: Vec<Hand>,
    pub points: u32,
    pub standing: Standing,
    pub time_budget_ms: u64,
    pub feedback: Option<Feedback>,
}

impl Round {
    pub fn player_hand(&self) -> &[CardToken] {
        self.hands.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn opponents(&self) -> &[Hand] {
        self.hands.get(1..).unwrap_or(&[])
    }

    pub fn is_guessed(&self) -> bool {
        self.feedback.is_some()
    }

    /// Correctness of the attached feedback, if any
    pub fn correctness(&self) -> Option<Correctness> {
        self.feedback
            .as_ref()
            .map(|fb| classify(fb.guess, fb.distance))
    }
}

/// The server's verdict on a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub id: u32,
    pub guess: u32,
    /// `guess - actual outs`
    pub distance: i32,
    pub outs: Vec<CardToken>,
    pub draws: u32,
    /// Points earned this round
    pub points: u32,
    pub score: u64,
    pub rank: Option<u32>,
    pub rank_interval: Option<u32>,
    pub more: bool,
}

impl Feedback {
    pub fn correctness(&self) -> Correctness {
        classify(self.guess, self.distance)
    }

    pub fn is_forced(&self) -> bool {
        self.guess >= GUESS_PASS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correctness {
    Perfect,
    Close,
    Wrong,
    Pass,
}

impl fmt::Display for Correctness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Correctness::Perfect => "perfect",
            Correctness::Close => "close",
            Correctness::Wrong => "wrong",
            Correctness::Pass => "pass",
        };
        write!(f, "{}", name)
    }
}

/// Bucket a guess by its distance from the real outs count.
///
/// Sentinel guesses (>= 100) never score: an explicit pass is `Pass`,
/// anything above it (an expired timer or out-of-range input) is `Wrong`.
pub fn classify(guess: u32, distance: i32) -> Correctness {
    if guess >= GUESS_PASS {
        return if guess == GUESS_PASS {
            Correctness::Pass
        } else {
            Correctness::Wrong
        };
    }

    match distance {
        0 => Correctness::Perfect,
        d if d.abs() <= GUESS_MARGIN => Correctness::Close,
        _ => Correctness::Wrong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_real_guesses() {
        assert_eq!(classify(8, 0), Correctness::Perfect);
        for d in [-2, -1, 1, 2] {
            assert_eq!(classify(8, d), Correctness::Close);
        }
        assert_eq!(classify(13, 5), Correctness::Wrong);
        assert_eq!(classify(0, -3), Correctness::Wrong);
    }

    #[test]
    fn test_classify_sentinels_never_score() {
        // A sentinel can land on distance 0 or 1 if the real count is near 100
        assert_eq!(classify(GUESS_PASS, 0), Correctness::Pass);
        assert_eq!(classify(GUESS_PASS, 91), Correctness::Pass);
        assert_eq!(classify(GUESS_EXPIRED, 0), Correctness::Wrong);
        assert_eq!(classify(GUESS_EXPIRED, 1), Correctness::Wrong);
        assert_eq!(classify(250, 240), Correctness::Wrong);
    }

    #[test]
    fn test_round_hand_accessors() {
        let c = |s: &str| s.parse::<CardToken>().unwrap();
        let round = Round {
            id: 3,
            board: vec![c("2c"), c("7d"), c("9h"), c("Ks")],
            hands: vec![vec![c("Ah"), c("Ad")], vec![c("Qs"), c("Js")]],
            points: 3000,
            standing: Standing::Ahead,
            time_budget_ms: 51_000,
            feedback: None,
        };
        assert_eq!(round.player_hand(), &[c("Ah"), c("Ad")]);
        assert_eq!(round.opponents().len(), 1);
        assert!(!round.is_guessed());
        assert_eq!(round.correctness(), None);
    }
}
