use std::time::Duration;

/// Countdown resolution. Every tick removes exactly this much from the budget.
pub const TICK_QUANTUM: Duration = Duration::from_millis(100);

const QUANTUM_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { stake: u32 },
    Expired,
}

/// The decaying stake of the round currently on the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    pub round_id: u32,
    pub total_ms: u64,
    pub remaining_ms: u64,
    pub points: u32,
}

impl Countdown {
    pub fn new(round_id: u32, total_ms: u64, points: u32) -> Self {
        Self {
            round_id,
            total_ms,
            remaining_ms: total_ms,
            points,
        }
    }

    /// Points the player would lock in by guessing now
    pub fn stake(&self) -> u32 {
        if self.total_ms == 0 {
            return self.points;
        }
        let scaled = self.points as f64 * self.remaining_ms as f64 / self.total_ms as f64;
        scaled.round().max(0.0) as u32
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms == 0
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.remaining_ms = self.remaining_ms.saturating_sub(QUANTUM_MS);
        if self.is_expired() {
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                stake: self.stake(),
            }
        }
    }

    /// Seconds left, for the clock readout
    pub fn seconds_left(&self) -> f64 {
        self.remaining_ms as f64 / 1000.0
    }
}

/// Counts countdowns armed and disarmed over the controller's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountdownLedger {
    pub armed: u64,
    pub disarmed: u64,
}

impl CountdownLedger {
    pub fn live(&self) -> u64 {
        self.armed - self.disarmed
    }
}
