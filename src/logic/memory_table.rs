//! Pairing memory: symmetric repetition counters between players, and the
//! conversion of those counts into fairness scores.

use crate::config::{CurveConfig, Normalization, SchedulerConfig};
use crate::models::{Match, Player, PlayerId};
use std::collections::HashMap;

/// Symmetric `player x player -> repetition count` table with a score curve.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryTable {
    counts: HashMap<PlayerId, HashMap<PlayerId, u32>>,
    curve: CurveConfig,
}

impl MemoryTable {
    pub fn new(curve: CurveConfig) -> Self {
        Self {
            counts: HashMap::new(),
            curve,
        }
    }

    fn add_directed(&mut self, from: &str, to: &str) {
        *self
            .counts
            .entry(from.to_owned())
            .or_default()
            .entry(to.to_owned())
            .or_insert(0) += 1;
    }

    /// Record one more co-occurrence of the unordered pair.
    pub fn add_item(&mut self, a: &str, b: &str) {
        self.add_directed(a, b);
        self.add_directed(b, a);
    }

    /// Times `a` and `b` have met (0 when never seen).
    pub fn count(&self, a: &str, b: &str) -> u32 {
        self.counts
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(0)
    }

    /// Total co-occurrences of `id` across all partners.
    pub fn get_amount_of_matches(&self, id: &str) -> u32 {
        self.counts
            .get(id)
            .map(|row| row.values().sum())
            .unwrap_or(0)
    }

    fn raw_score(&self, count: u32) -> f64 {
        self.curve
            .coefficients
            .get(count as usize)
            .copied()
            .unwrap_or(self.curve.overflow)
    }

    /// Score of pairing `a` with `b`, seen from `a`. Zero when a guest is involved.
    pub fn get_score(&self, a: &str, b: &str, is_guest: bool) -> f64 {
        if is_guest {
            return 0.0;
        }
        let raw = self.raw_score(self.count(a, b));
        match self.curve.normalization {
            Normalization::None => raw,
            Normalization::ByMatchesPlayed => {
                let factor = f64::from(self.get_amount_of_matches(a)) + 1.0;
                if raw > 0.0 {
                    raw / factor
                } else {
                    raw * factor
                }
            }
        }
    }

    /// Best score `id` could get against any of `candidates`.
    /// Falls back to [`MemoryTable::upper_bound`] when there is no candidate.
    pub fn get_max_score<'a>(
        &self,
        id: &str,
        candidates: impl IntoIterator<Item = &'a Player>,
        is_guest: bool,
    ) -> f64 {
        if is_guest {
            return 0.0;
        }
        candidates
            .into_iter()
            .filter(|c| c.id != id)
            .map(|c| self.get_score(id, &c.id, c.guest))
            .reduce(f64::max)
            .unwrap_or_else(|| self.upper_bound())
    }

    /// Largest value any single `get_score` call can return.
    pub fn upper_bound(&self) -> f64 {
        self.curve
            .coefficients
            .iter()
            .copied()
            .fold(self.curve.overflow.max(0.0), f64::max)
    }
}

/// The two memory tables threaded through a scheduling call.
#[derive(Clone, Debug, PartialEq)]
pub struct PairingMemory {
    /// Teammates.
    pub play_with: MemoryTable,
    /// Opponents.
    pub play_against: MemoryTable,
}

impl PairingMemory {
    /// Empty tables with the configured curves.
    pub fn new(config: &SchedulerConfig) -> Self {
        Self {
            play_with: MemoryTable::new(config.play_with.clone()),
            play_against: MemoryTable::new(config.play_against.clone()),
        }
    }

    /// Replay history; only finished official matches are counted.
    pub fn from_history<'a>(
        config: &SchedulerConfig,
        played_matches: impl IntoIterator<Item = &'a Match>,
    ) -> Self {
        let mut memory = Self::new(config);
        let mut replayed = 0usize;
        for m in played_matches.into_iter().filter(|m| m.counts_for_history()) {
            memory.record_match(m);
            replayed += 1;
        }
        log::debug!("Pairing memory built from {} official match(es)", replayed);
        memory
    }

    /// Fold one match into the tables: 2 teammate pairs, 4 opponent pairs.
    pub fn record_match(&mut self, m: &Match) {
        let [dl, rl, dv, rv] = m.players();
        self.play_with.add_item(&dl.id, &rl.id);
        self.play_with.add_item(&dv.id, &rv.id);
        for local in [dl, rl] {
            for visitor in [dv, rv] {
                self.play_against.add_item(&local.id, &visitor.id);
            }
        }
    }
}
