//! Schedule request, generated rounds and ScheduleError.

use crate::models::game::{LeagueId, Match};
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur before a schedule search starts.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ScheduleError {
    /// No players to schedule.
    #[error("Need at least 4 players to generate matches")]
    EmptyRoster,
    /// Every match needs exactly four players.
    #[error("The number of players must be a multiple of 4 (got {players})")]
    RosterNotMultipleOfFour { players: usize },
    /// A fixed-size strategy was called with the wrong roster.
    #[error("Players must be {expected} (got {actual})")]
    InvalidRosterSize { expected: usize, actual: usize },
    /// Round count must be at least 1.
    #[error("At least one round must be generated")]
    NoRounds,
    /// Round count above the configured maximum.
    #[error("Max rounds is {max} (requested {requested})")]
    TooManyRounds { max: u32, requested: u32 },
    /// The same player id appears twice in the roster.
    #[error("Player {0} appears more than once")]
    DuplicatePlayer(PlayerId),
    /// A coefficient curve is empty or holds a non-finite value.
    #[error("Coefficient curves must be non-empty and finite")]
    InvalidCoefficients,
    /// A catalogue partition does not split its roster into groups of 4.
    #[error("Partition {index} for {roster_size} players is not a split into groups of 4")]
    InvalidPartition { roster_size: usize, index: usize },
}

/// Parameters for one scheduling call, besides roster and history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub league_id: LeagueId,
    pub rounds: u32,
    pub date: DateTime<Utc>,
}

impl ScheduleRequest {
    pub fn new(league_id: impl Into<LeagueId>, rounds: u32, date: DateTime<Utc>) -> Self {
        Self {
            league_id: league_id.into(),
            rounds,
            date,
        }
    }

    /// Check the round count against the configured maximum.
    pub fn validate(&self, max_rounds: u32) -> Result<(), ScheduleError> {
        if self.rounds == 0 {
            return Err(ScheduleError::NoRounds);
        }
        if self.rounds > max_rounds {
            return Err(ScheduleError::TooManyRounds {
                max: max_rounds,
                requested: self.rounds,
            });
        }
        Ok(())
    }
}

/// Matches produced for one round plus the fairness score of that assignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRound {
    /// 1-based round number.
    pub round: u32,
    pub matches: Vec<Match>,
    pub score: f64,
    /// False when a search budget stopped the search early.
    pub exhausted: bool,
}
