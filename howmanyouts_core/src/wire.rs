//! JSON schema of the game server's replies.
//!
//! Every reply is wrapped as `{"game": {...}}` with a `status` field. The
//! structs here mirror that shape loosely and are validated into domain types
//! before anything else sees them, so a missing field surfaces as
//! [`ClientError::MalformedResponse`] instead of leaking into the controller.

use serde::Deserialize;

use crate::card::{CardToken, Hand};
use crate::error::{ClientError, Result};
use crate::round::{Feedback, Round, Standing};
use crate::scoreboard::{GameInfo, Leader, ScoreEntry, ScoreScope, Scoreboard};

/// A new round together with the game header it arrived with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReply {
    pub info: GameInfo,
    pub round: Round,
}

/// Feedback for a guess together with the game header it arrived with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackReply {
    pub info: GameInfo,
    pub feedback: Feedback,
}

#[derive(Deserialize)]
struct Envelope<T> {
    game: T,
}

#[derive(Deserialize)]
struct GameBody {
    status: String,
    id: Option<u64>,
    time: Option<i64>,
    name: Option<String>,
    more: Option<String>,
    alltime_name: Option<String>,
    alltime_score: Option<LooseNumber>,
    interval_name: Option<String>,
    interval_score: Option<LooseNumber>,
    round: Option<RoundBody>,
    feedback: Option<FeedbackBody>,
}

#[derive(Deserialize)]
struct RoundBody {
    id: Option<u32>,
    #[serde(default)]
    board: Vec<CardToken>,
    hands: Option<Vec<Hand>>,
    ahead: Option<AheadField>,
    points: Option<u32>,
    time: Option<i64>,
}

#[derive(Deserialize)]
struct FeedbackBody {
    id: u32,
    guess: u32,
    distance: i32,
    outs: Vec<CardToken>,
    draws: u32,
    #[serde(default)]
    points: u32,
    #[serde(default)]
    score: u64,
    rank: Option<u32>,
    rank_interval: Option<u32>,
}

#[derive(Deserialize)]
struct ScoresBody {
    status: String,
    interval: Option<String>,
    #[serde(default)]
    scores: Vec<(serde_json::Value, String, LooseNumber)>,
}

/// Scores come back as numbers or as numeric strings depending on the column.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(u64),
    Text(String),
}

impl LooseNumber {
    fn value(&self) -> Result<u64> {
        match self {
            LooseNumber::Number(n) => Ok(*n),
            LooseNumber::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ClientError::malformed(format!("score {s:?} is not a number"))),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AheadField {
    Flag(bool),
    Word(String),
}

impl AheadField {
    fn standing(&self) -> Result<Standing> {
        match self {
            // The server folds ties into "ahead"
            AheadField::Flag(true) => Ok(Standing::Ahead),
            AheadField::Flag(false) => Ok(Standing::Behind),
            AheadField::Word(w) => match w.as_str() {
                "ahead" => Ok(Standing::Ahead),
                "tied" => Ok(Standing::Tied),
                "behind" => Ok(Standing::Behind),
                other => Err(ClientError::malformed(format!("unknown standing {other:?}"))),
            },
        }
    }
}

fn decode<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|env| env.game)
        .map_err(|e| ClientError::malformed(e.to_string()))
}

fn missing(field: &str) -> ClientError {
    ClientError::malformed(format!("missing field `{field}`"))
}

fn game_info(body: &GameBody) -> Result<GameInfo> {
    let leader = |name: &Option<String>, score: &Option<LooseNumber>| -> Result<Leader> {
        let mut leader = Leader::default();
        if let Some(name) = name {
            leader.name = name.clone();
        }
        if let Some(score) = score {
            leader.score = score.value()?;
        }
        Ok(leader)
    };

    Ok(GameInfo {
        game_id: body.id.ok_or_else(|| missing("id"))?,
        player_name: body.name.clone().unwrap_or_default(),
        time_secs: body.time.unwrap_or(-1),
        more: body.more.as_deref() == Some("yes"),
        alltime: leader(&body.alltime_name, &body.alltime_score)?,
        interval: leader(&body.interval_name, &body.interval_score)?,
    })
}

/// Parse the reply to "new game" or "next round".
pub fn parse_round_reply(body: &str) -> Result<RoundReply> {
    let game: GameBody = decode(body)?;
    if game.status != "ok" {
        return Err(ClientError::ServerRejected { request: "round" });
    }
    let info = game_info(&game)?;
    let raw = game.round.ok_or_else(|| missing("round"))?;

    let hands = raw.hands.ok_or_else(|| missing("round.hands"))?;
    if hands.is_empty() {
        return Err(ClientError::malformed("round has no player hand"));
    }
    if raw.board.len() > 5 {
        return Err(ClientError::malformed("board has more than five cards"));
    }

    let secs = raw.time.unwrap_or(info.time_secs);
    let round = Round {
        id: raw.id.ok_or_else(|| missing("round.id"))?,
        board: raw.board,
        hands,
        points: raw.points.ok_or_else(|| missing("round.points"))?,
        standing: raw.ahead.ok_or_else(|| missing("round.ahead"))?.standing()?,
        time_budget_ms: if secs > 0 { secs as u64 * 1000 } else { 0 },
        feedback: None,
    };
    if round.id == 0 {
        return Err(ClientError::malformed("round id must be positive"));
    }

    Ok(RoundReply { info, round })
}

/// Parse the reply to a guess of `outs`.
pub fn parse_feedback_reply(body: &str, outs: u32) -> Result<FeedbackReply> {
    let game: GameBody = decode(body)?;
    if game.status != "ok" {
        return Err(ClientError::InvalidGuess { outs });
    }
    let info = game_info(&game)?;
    let raw = game.feedback.ok_or_else(|| missing("feedback"))?;

    let feedback = Feedback {
        id: raw.id,
        guess: raw.guess,
        distance: raw.distance,
        outs: raw.outs,
        draws: raw.draws,
        points: raw.points,
        score: raw.score,
        rank: raw.rank,
        rank_interval: raw.rank_interval,
        more: info.more,
    };

    Ok(FeedbackReply { info, feedback })
}

/// Parse the reply to a name change. Only the status matters.
pub fn parse_name_reply(body: &str) -> Result<()> {
    #[derive(Deserialize)]
    struct StatusBody {
        status: String,
    }

    let game: StatusBody = decode(body)?;
    if game.status != "ok" {
        return Err(ClientError::ServerRejected { request: "name" });
    }
    Ok(())
}

/// Parse a hi-score table. Positions are taken from list order.
pub fn parse_scoreboard(body: &str, scope: ScoreScope) -> Result<Scoreboard> {
    let game: ScoresBody = decode(body)?;
    if game.status != "ok" {
        return Err(ClientError::ServerRejected { request: "scores" });
    }
    if let Some(echoed) = game.interval.as_deref().map(ScoreScope::from_path) {
        if echoed != scope {
            return Err(ClientError::malformed(format!(
                "asked for {} scores, got {}",
                scope, echoed
            )));
        }
    }

    let entries = game
        .scores
        .iter()
        .enumerate()
        .map(|(i, (_, name, score))| {
            Ok(ScoreEntry {
                position: i as u32 + 1,
                name: name.clone(),
                score: score.value()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Scoreboard { scope, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::Correctness;

    const FIRST_ROUND: &str = r#"{"game": {
        "status": "ok", "id": 42, "time": -1, "name": "Ralphie", "more": "yes",
        "alltime_name": "Nobody Yet!", "alltime_score": "0",
        "interval_name": "Dana", "interval_score": 48210,
        "round": {"status": "ok", "id": 1, "points": 1000, "ahead": true,
                  "board": ["2c", "7d", "9h", "Ks"],
                  "hands": [["Ah", "Ad"], ["Qs", "Js"]]}
    }}"#;

    #[test]
    fn test_parse_first_round() {
        let reply = parse_round_reply(FIRST_ROUND).unwrap();
        assert_eq!(reply.info.game_id, 42);
        assert!(reply.info.more);
        assert_eq!(reply.info.alltime.score, 0);
        assert_eq!(reply.info.interval.name, "Dana");
        assert_eq!(reply.info.interval.score, 48210);

        let round = reply.round;
        assert_eq!(round.id, 1);
        assert_eq!(round.board.len(), 4);
        assert_eq!(round.hands.len(), 2);
        assert_eq!(round.standing, Standing::Ahead);
        // Unlimited time on the first round
        assert_eq!(round.time_budget_ms, 0);
    }

    #[test]
    fn test_round_time_falls_back_to_game_time() {
        let body = FIRST_ROUND.replace(r#""time": -1"#, r#""time": 56"#);
        let reply = parse_round_reply(&body).unwrap();
        assert_eq!(reply.round.time_budget_ms, 56_000);
    }

    #[test]
    fn test_round_missing_field_is_malformed() {
        let body = FIRST_ROUND.replace(r#""points": 1000, "#, "");
        match parse_round_reply(&body) {
            Err(ClientError::MalformedResponse { message }) => {
                assert!(message.contains("round.points"))
            }
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_card_is_malformed() {
        let body = FIRST_ROUND.replace(r#""Ks""#, r#""Kz""#);
        assert!(matches!(
            parse_round_reply(&body),
            Err(ClientError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_error_status_is_rejected() {
        let body = r#"{"game": {"status": "error"}}"#;
        assert_eq!(
            parse_round_reply(body),
            Err(ClientError::ServerRejected { request: "round" })
        );
        assert_eq!(
            parse_feedback_reply(body, 7),
            Err(ClientError::InvalidGuess { outs: 7 })
        );
    }

    #[test]
    fn test_parse_final_feedback() {
        let body = r#"{"game": {
            "status": "ok", "id": 42, "time": 20, "name": "Ralphie", "more": "no",
            "feedback": {"id": 10, "guess": 8, "distance": 0, "draws": 44,
                         "points": 12000, "score": 31500, "rank": 3, "rank_interval": 1,
                         "outs": ["2h", "3h", "4h", "5h", "6h", "7h", "8h", "9h"]}
        }}"#;
        let reply = parse_feedback_reply(body, 8).unwrap();
        let fb = reply.feedback;
        assert_eq!(fb.id, 10);
        assert!(!fb.more);
        assert_eq!(fb.outs.len(), 8);
        assert_eq!(fb.rank, Some(3));
        assert_eq!(fb.rank_interval, Some(1));
        assert_eq!(fb.correctness(), Correctness::Perfect);
    }

    #[test]
    fn test_parse_scoreboard() {
        let body = r#"{"game": {"status": "ok", "interval": "all",
            "scores": [[1, "Dana", 48210], [2, "Ralphie", "31500"]]}}"#;
        let board = parse_scoreboard(body, ScoreScope::AllTime).unwrap();
        assert_eq!(board.entries.len(), 2);
        assert_eq!(board.entries[1].position, 2);
        assert_eq!(board.entries[1].name, "Ralphie");
        assert_eq!(board.entries[1].score, 31500);
    }

    #[test]
    fn test_scoreboard_scope_must_match_request() {
        let body = r#"{"game": {"status": "ok", "interval": "interval", "scores": []}}"#;
        let board = parse_scoreboard(body, ScoreScope::Interval).unwrap();
        assert_eq!(board.scope, ScoreScope::Interval);
        assert!(board.entries.is_empty());

        let err = parse_scoreboard(body, ScoreScope::AllTime).unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_name_reply() {
        assert!(parse_name_reply(r#"{"game": {"status": "ok"}}"#).is_ok());
    }
}
