use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;

/// Terminal client for How Many Outs
#[derive(Debug, Clone, Parser)]
#[command(name = "howmanyouts")]
#[command(about = "Guess the outs before the stake runs out")]
pub struct Config {
    /// Base URL of the game server
    #[arg(long, env = "HOWMANYOUTS_SERVER", default_value = "http://localhost:5000")]
    pub server: Url,

    /// Player name shown on the leaderboards
    #[arg(long, env = "HOWMANYOUTS_NAME")]
    pub name: Option<String>,

    /// Where to write the log; the terminal itself is taken by the UI
    #[arg(long, default_value = "howmanyouts.log")]
    pub log_file: PathBuf,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout_secs: u64,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
