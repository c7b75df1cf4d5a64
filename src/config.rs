//! Scheduler configuration: coefficient curves, search limits, tie-break policy
//! and the partition catalogue. Every field has a default so a partial JSON
//! document (or none at all) yields a usable configuration.

use crate::logic::PartitionCatalogue;
use crate::models::ScheduleError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a raw coefficient is adjusted by the evaluated player's match count.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Raw coefficient as-is.
    #[default]
    None,
    /// Positive scores are divided by `matches + 1`, negative ones multiplied by it.
    ByMatchesPlayed,
}

/// Score-per-repetition curve of one pairing memory table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Index = number of prior co-occurrences, value = score contribution.
    pub coefficients: Vec<f64>,
    /// Score for counts beyond the end of `coefficients`.
    #[serde(default = "default_overflow")]
    pub overflow: f64,
    #[serde(default)]
    pub normalization: Normalization,
}

fn default_overflow() -> f64 {
    10.0
}

impl CurveConfig {
    /// Teammate curve: strong reward for a new partner, penalty from the second repeat.
    pub fn play_with() -> Self {
        Self {
            coefficients: vec![25.0, 15.0, -5.0],
            overflow: default_overflow(),
            normalization: Normalization::ByMatchesPlayed,
        }
    }

    /// Opponent curve.
    pub fn play_against() -> Self {
        Self {
            coefficients: vec![130.0, 50.0, 15.0, 1.0],
            overflow: default_overflow(),
            normalization: Normalization::None,
        }
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.coefficients.is_empty()
            || !self.overflow.is_finite()
            || self.coefficients.iter().any(|c| !c.is_finite())
        {
            return Err(ScheduleError::InvalidCoefficients);
        }
        Ok(())
    }
}

/// Budget for a single branch-and-bound search. When a limit is hit the search
/// stops and returns its incumbent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SearchLimits {
    #[serde(default = "default_max_expansions")]
    pub max_expansions: Option<u64>,
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

fn default_max_expansions() -> Option<u64> {
    Some(100_000)
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: default_max_expansions(),
            time_limit_ms: None,
        }
    }
}

impl SearchLimits {
    /// No limits: the search runs until the frontier is empty.
    pub fn unbounded() -> Self {
        Self {
            max_expansions: None,
            time_limit_ms: None,
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

/// Ordering among players with the same number of played matches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep roster order.
    #[default]
    Stable,
    /// Reproducible shuffle from the given seed.
    Seeded(u64),
}

/// Full scheduler configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "CurveConfig::play_with")]
    pub play_with: CurveConfig,
    #[serde(default = "CurveConfig::play_against")]
    pub play_against: CurveConfig,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    #[serde(default)]
    pub limits: SearchLimits,
    #[serde(default)]
    pub tie_break: TieBreak,
    #[serde(default)]
    pub partitions: PartitionCatalogue,
}

fn default_max_rounds() -> u32 {
    3
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            play_with: CurveConfig::play_with(),
            play_against: CurveConfig::play_against(),
            max_rounds: default_max_rounds(),
            limits: SearchLimits::default(),
            tie_break: TieBreak::default(),
            partitions: PartitionCatalogue::default(),
        }
    }
}

impl SchedulerConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.play_with.validate()?;
        self.play_against.validate()?;
        self.partitions.validate()
    }
}
