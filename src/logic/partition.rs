//! Partitioned search for larger cohorts.
//!
//! A full search over 12 players does not finish in acceptable time, so the
//! sorted roster is split by a fixed catalogue of candidate partitions (an
//! 8-player and a 4-player group). Each group is searched on its own and the
//! partition with the best combined score wins. The catalogue is plain
//! configuration: more sizes can be added without code changes.

use crate::config::SchedulerConfig;
use crate::logic::memory_table::PairingMemory;
use crate::logic::ordering::build_initial_solution;
use crate::logic::rounds::{build_matches, sorted_roster, validate_roster};
use crate::logic::scoring::improves;
use crate::logic::search::{generate_matching, is_permutation, SearchOutcome};
use crate::logic::slots::SLOTS_PER_MATCH;
use crate::models::{GeneratedRound, Match, Player, ScheduleError, ScheduleRequest};
use serde::{Deserialize, Serialize};

const TWELVE_PLAYERS: usize = 12;

/// Candidate 12-player splits over the sorted roster (least played first):
/// (8-player group, 4-player group).
const TWELVE_PLAYER_PARTITIONS: [([usize; 8], [usize; 4]); 5] = [
    ([0, 1, 2, 3, 4, 5, 6, 7], [8, 9, 10, 11]),
    ([0, 1, 2, 3, 4, 5, 8, 10], [6, 7, 9, 11]),
    ([0, 1, 2, 3, 4, 5, 6, 11], [7, 8, 9, 10]),
    ([0, 1, 2, 3, 4, 5, 10, 11], [6, 7, 8, 9]),
    ([0, 1, 4, 5, 8, 9, 10, 11], [2, 3, 6, 7]),
];

/// Split of a sorted roster into independently searched groups.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub groups: Vec<Vec<usize>>,
}

impl Partition {
    /// Whether some group would have to put exactly one guest in a match.
    fn forces_single_guest(&self, sorted: &[Player]) -> bool {
        self.groups.iter().any(|group| {
            let guests = group.iter().filter(|&&i| sorted[i].guest).count();
            let regulars = group.len() - guests;
            guests > 0 && regulars % SLOTS_PER_MATCH == SLOTS_PER_MATCH - 1
        })
    }

    fn is_valid_for(&self, roster_size: usize) -> bool {
        let flat: Vec<usize> = self.groups.iter().flatten().copied().collect();
        self.groups
            .iter()
            .all(|g| !g.is_empty() && g.len() % SLOTS_PER_MATCH == 0)
            && is_permutation(&flat, roster_size)
    }
}

/// All candidate partitions for one roster size.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PartitionSet {
    pub roster_size: usize,
    pub partitions: Vec<Partition>,
}

impl PartitionSet {
    /// The built-in 12-player catalogue.
    pub fn twelve_players() -> Self {
        Self {
            roster_size: TWELVE_PLAYERS,
            partitions: TWELVE_PLAYER_PARTITIONS
                .iter()
                .map(|(eight, four)| Partition {
                    groups: vec![eight.to_vec(), four.to_vec()],
                })
                .collect(),
        }
    }
}

/// Partition sets keyed by roster size.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PartitionCatalogue {
    pub sets: Vec<PartitionSet>,
}

impl Default for PartitionCatalogue {
    fn default() -> Self {
        Self {
            sets: vec![PartitionSet::twelve_players()],
        }
    }
}

impl PartitionCatalogue {
    /// No partitioning: every roster size uses the full search.
    pub fn empty() -> Self {
        Self { sets: Vec::new() }
    }

    pub fn for_size(&self, roster_size: usize) -> Option<&PartitionSet> {
        self.sets
            .iter()
            .find(|s| s.roster_size == roster_size && !s.partitions.is_empty())
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        for set in &self.sets {
            for (index, partition) in set.partitions.iter().enumerate() {
                if !partition.is_valid_for(set.roster_size) {
                    return Err(ScheduleError::InvalidPartition {
                        roster_size: set.roster_size,
                        index,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Best partition of one round: the partition and one search outcome per group.
struct PartitionChoice<'a> {
    partition: &'a Partition,
    members: Vec<Vec<usize>>,
    outcomes: Vec<SearchOutcome>,
    score: f64,
}

fn search_partition<'a>(
    partition: &'a Partition,
    sorted: &[Player],
    memory: &PairingMemory,
    config: &SchedulerConfig,
) -> PartitionChoice<'a> {
    let mut members = Vec::with_capacity(partition.groups.len());
    let mut outcomes = Vec::with_capacity(partition.groups.len());
    let mut score = 0.0;
    for group in &partition.groups {
        // Keep the sorted order (guests last) inside every group.
        let mut group = group.clone();
        group.sort_unstable();
        let sub: Vec<Player> = group.iter().map(|&i| sorted[i].clone()).collect();
        let seed = build_initial_solution(&sub);
        let outcome = generate_matching(&sub, Some(seed.as_slice()), memory, &config.limits);
        score += outcome.score;
        members.push(group);
        outcomes.push(outcome);
    }
    PartitionChoice {
        partition,
        members,
        outcomes,
        score,
    }
}

/// Generate rounds with the partitions of `set`, whose size must match the roster.
pub fn build_matches_with_partitions(
    players: &[Player],
    played_matches: &[Match],
    request: &ScheduleRequest,
    config: &SchedulerConfig,
    set: &PartitionSet,
) -> Result<Vec<GeneratedRound>, ScheduleError> {
    if players.len() != set.roster_size {
        return Err(ScheduleError::InvalidRosterSize {
            expected: set.roster_size,
            actual: players.len(),
        });
    }
    validate_roster(players)?;
    request.validate(config.max_rounds)?;
    config.validate()?;
    let invalid = if set.partitions.is_empty() {
        Some(0)
    } else {
        set.partitions
            .iter()
            .position(|p| !p.is_valid_for(set.roster_size))
    };
    if let Some(index) = invalid {
        return Err(ScheduleError::InvalidPartition {
            roster_size: set.roster_size,
            index,
        });
    }

    let mut memory = PairingMemory::from_history(config, played_matches);
    let mut rounds = Vec::with_capacity(request.rounds as usize);
    for round in 1..=request.rounds {
        let sorted = sorted_roster(players, &memory, config.tie_break);
        let mut candidates: Vec<&Partition> = set
            .partitions
            .iter()
            .filter(|p| !p.forces_single_guest(&sorted))
            .collect();
        if candidates.is_empty() {
            candidates = set.partitions.iter().collect();
        }

        let Some((first, rest)) = candidates.split_first() else {
            return Err(ScheduleError::InvalidPartition {
                roster_size: set.roster_size,
                index: 0,
            });
        };
        let mut best = search_partition(first, &sorted, &memory, config);
        log::debug!("Round {}: partition {:?} scores {:.3}", round, first.groups, best.score);
        for partition in rest {
            let choice = search_partition(partition, &sorted, &memory, config);
            log::debug!(
                "Round {}: partition {:?} scores {:.3}",
                round,
                partition.groups,
                choice.score
            );
            if improves(choice.score, best.score) {
                best = choice;
            }
        }

        let mut matches = Vec::new();
        for (group, outcome) in best.members.iter().zip(&best.outcomes) {
            let mapped: Vec<usize> = outcome.solution.iter().map(|&i| group[i]).collect();
            matches.extend(build_matches(&mapped, &sorted, request, round, &mut memory));
        }
        log::info!(
            "League {}: round {} with {} match(es) from partition {:?}, score {:.3}",
            request.league_id,
            round,
            matches.len(),
            best.partition.groups,
            best.score
        );
        rounds.push(GeneratedRound {
            round,
            matches,
            score: best.score,
            exhausted: best.outcomes.iter().all(|o| o.exhausted),
        });
    }
    Ok(rounds)
}

/// Generate rounds for exactly 12 players with the configured 12-player
/// partitions (the built-in catalogue when the configuration has none).
pub fn build_matches_from_list_12(
    players: &[Player],
    played_matches: &[Match],
    request: &ScheduleRequest,
    config: &SchedulerConfig,
) -> Result<Vec<GeneratedRound>, ScheduleError> {
    if players.len() != TWELVE_PLAYERS {
        return Err(ScheduleError::InvalidRosterSize {
            expected: TWELVE_PLAYERS,
            actual: players.len(),
        });
    }
    match config.partitions.for_size(TWELVE_PLAYERS) {
        Some(set) => build_matches_with_partitions(players, played_matches, request, config, set),
        None => {
            let set = PartitionSet::twelve_players();
            build_matches_with_partitions(players, played_matches, request, config, &set)
        }
    }
}
