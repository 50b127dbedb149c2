use std::collections::BTreeMap;

use crate::round::{Feedback, Round};

/// Every round dealt in the current game, keyed by round id.
///
/// Rounds are only ever added; the one mutation allowed is attaching feedback
/// to a round that has none yet.
#[derive(Debug, Clone, Default)]
pub struct RoundHistory {
    rounds: BTreeMap<u32, Round>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    UnknownRound,
    AlreadyAttached,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly dealt round. Returns false if the id is already taken.
    pub fn insert(&mut self, round: Round) -> bool {
        if self.rounds.contains_key(&round.id) {
            return false;
        }
        self.rounds.insert(round.id, round);
        true
    }

    pub fn attach(&mut self, feedback: Feedback) -> Result<&Round, AttachError> {
        let round = self
            .rounds
            .get_mut(&feedback.id)
            .ok_or(AttachError::UnknownRound)?;
        if round.feedback.is_some() {
            return Err(AttachError::AlreadyAttached);
        }
        round.feedback = Some(feedback);
        Ok(&*round)
    }

    pub fn get(&self, id: u32) -> Option<&Round> {
        self.rounds.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.rounds.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.rounds.clear();
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Rounds in id order
    pub fn iter(&self) -> impl Iterator<Item = &Round> {
        self.rounds.values()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.rounds.keys().copied().collect()
    }

    pub fn latest(&self) -> Option<&Round> {
        self.rounds.values().next_back()
    }

    /// Id of the round before/after `id`, for stepping through a review
    pub fn neighbor(&self, id: u32, forward: bool) -> Option<u32> {
        if forward {
            self.rounds.range(id.saturating_add(1)..).next().map(|(k, _)| *k)
        } else {
            self.rounds.range(..id).next_back().map(|(k, _)| *k)
        }
    }
}
