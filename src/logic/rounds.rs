//! Round orchestration: replay history, then for every round order the roster,
//! search the best assignment, turn it into matches and fold those matches
//! back into the pairing memory before the next round.

use crate::config::{SchedulerConfig, TieBreak};
use crate::logic::memory_table::PairingMemory;
use crate::logic::ordering::{build_initial_solution, sort_players_by_matches_played};
use crate::logic::partition::build_matches_with_partitions;
use crate::logic::search::generate_matching;
use crate::logic::slots::SLOTS_PER_MATCH;
use crate::models::{GeneratedRound, Match, Player, ScheduleError, ScheduleRequest, TeamPair};

/// Reject rosters that cannot be split into matches of four.
pub fn validate_roster(players: &[Player]) -> Result<(), ScheduleError> {
    if players.is_empty() {
        return Err(ScheduleError::EmptyRoster);
    }
    if players.len() % SLOTS_PER_MATCH != 0 {
        return Err(ScheduleError::RosterNotMultipleOfFour {
            players: players.len(),
        });
    }
    Ok(())
}

/// Roster in search order for the current state of `memory`.
pub(crate) fn sorted_roster(players: &[Player], memory: &PairingMemory, tie_break: TieBreak) -> Vec<Player> {
    sort_players_by_matches_played(players, &memory.play_with, tie_break)
        .into_iter()
        .map(|p| p.player)
        .collect()
}

/// Turn a slot assignment (indices into `players`) into matches, 4 slots at a
/// time, recording each new match in `memory`.
pub(crate) fn build_matches(
    solution: &[usize],
    players: &[Player],
    request: &ScheduleRequest,
    round: u32,
    memory: &mut PairingMemory,
) -> Vec<Match> {
    solution
        .chunks_exact(SLOTS_PER_MATCH)
        .map(|chunk| {
            let m = Match::new(
                request.league_id.clone(),
                TeamPair::new(players[chunk[0]].clone(), players[chunk[1]].clone()),
                TeamPair::new(players[chunk[2]].clone(), players[chunk[3]].clone()),
                request.date,
                round,
            );
            memory.record_match(&m);
            m
        })
        .collect()
}

/// Generate `request.rounds` rounds by searching the whole roster each round.
///
/// Only the leading `floor(regulars / 4)` blocks are kept guest-free. Unlike
/// the partitioned path, the trailing blocks are not checked for a lone
/// guest: with 3 leftover regulars and 5 or more guests a match may pair 3
/// regulars with 1 guest.
pub fn build_matches_from_list(
    players: &[Player],
    played_matches: &[Match],
    request: &ScheduleRequest,
    config: &SchedulerConfig,
) -> Result<Vec<GeneratedRound>, ScheduleError> {
    validate_roster(players)?;
    request.validate(config.max_rounds)?;
    config.validate()?;

    let mut memory = PairingMemory::from_history(config, played_matches);
    let mut rounds = Vec::with_capacity(request.rounds as usize);
    for round in 1..=request.rounds {
        let sorted = sorted_roster(players, &memory, config.tie_break);
        let seed = build_initial_solution(&sorted);
        let outcome = generate_matching(&sorted, Some(seed.as_slice()), &memory, &config.limits);
        let matches = build_matches(&outcome.solution, &sorted, request, round, &mut memory);
        log::info!(
            "League {}: round {} with {} match(es), score {:.3}",
            request.league_id,
            round,
            matches.len(),
            outcome.score
        );
        rounds.push(GeneratedRound {
            round,
            matches,
            score: outcome.score,
            exhausted: outcome.exhausted,
        });
    }
    Ok(rounds)
}

/// Pick the strategy for the roster size: the partition catalogue when it has
/// an entry for this size, the full search otherwise.
pub fn generate_rounds(
    players: &[Player],
    played_matches: &[Match],
    request: &ScheduleRequest,
    config: &SchedulerConfig,
) -> Result<Vec<GeneratedRound>, ScheduleError> {
    validate_roster(players)?;
    match config.partitions.for_size(players.len()) {
        Some(set) => build_matches_with_partitions(players, played_matches, request, config, set),
        None => build_matches_from_list(players, played_matches, request, config),
    }
}
