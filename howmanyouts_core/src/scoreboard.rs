use std::fmt;

/// Which leaderboard to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreScope {
    AllTime,
    /// The current weekly interval
    Interval,
}

impl ScoreScope {
    /// Path segment the server expects
    pub fn path(&self) -> &'static str {
        match self {
            ScoreScope::AllTime => "all",
            ScoreScope::Interval => "interval",
        }
    }

    /// Scope for the segment the server echoes back. The server treats
    /// anything but `interval` as all time.
    pub fn from_path(path: &str) -> Self {
        if path == "interval" {
            ScoreScope::Interval
        } else {
            ScoreScope::AllTime
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            ScoreScope::AllTime => ScoreScope::Interval,
            ScoreScope::Interval => ScoreScope::AllTime,
        }
    }
}

impl fmt::Display for ScoreScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreScope::AllTime => write!(f, "All Time"),
            ScoreScope::Interval => write!(f, "This Week"),
        }
    }
}

/// Holder of a best score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leader {
    pub name: String,
    pub score: u64,
}

impl Default for Leader {
    fn default() -> Self {
        Self {
            name: "Nobody Yet!".to_string(),
            score: 0,
        }
    }
}

/// Game header the server attaches to every round and feedback reply
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameInfo {
    pub game_id: u64,
    pub player_name: String,
    /// Seconds allowed for the current round, negative when unlimited
    pub time_secs: i64,
    pub more: bool,
    pub alltime: Leader,
    pub interval: Leader,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub position: u32,
    pub name: String,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub scope: ScoreScope,
    pub entries: Vec<ScoreEntry>,
}
