//! Roster ordering: least-played regulars first, guests last, and the seed
//! arrangement the search starts from.

use crate::config::TieBreak;
use crate::logic::memory_table::MemoryTable;
use crate::models::{Player, PlayerWithMatches};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sort players by ascending matches played (taken from the teammate table);
/// guests always go last.
///
/// Ties keep roster order with [`TieBreak::Stable`], or follow a reproducible
/// shuffle with [`TieBreak::Seeded`].
pub fn sort_players_by_matches_played(
    players: &[Player],
    play_with: &MemoryTable,
    tie_break: TieBreak,
) -> Vec<PlayerWithMatches> {
    let tiebreak_keys: Vec<u64> = match tie_break {
        TieBreak::Stable => (0..players.len() as u64).collect(),
        TieBreak::Seeded(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            players.iter().map(|_| rng.gen::<u64>()).collect()
        }
    };
    let mut with_tiebreak: Vec<(PlayerWithMatches, u64)> = players
        .iter()
        .zip(tiebreak_keys)
        .map(|(p, t)| {
            let ranked = PlayerWithMatches {
                played_matches: play_with.get_amount_of_matches(&p.id),
                player: p.clone(),
            };
            (ranked, t)
        })
        .collect();
    with_tiebreak.sort_by_key(|(p, t)| (p.player.guest, p.played_matches, *t));
    with_tiebreak.into_iter().map(|(p, _)| p).collect()
}

/// Number of leading blocks that hold regulars only.
pub fn regular_block_count(players: &[Player]) -> usize {
    players.iter().filter(|p| !p.guest).count() / 4
}

/// Seed arrangement (indices into `players`, which must already be sorted):
/// every all-regular block pairs the two least-played remaining regulars
/// against the two most-played ones; leftover regulars follow, guests last.
pub fn build_initial_solution(players: &[Player]) -> Vec<usize> {
    let regulars: Vec<usize> = (0..players.len()).filter(|&i| !players[i].guest).collect();
    let guests = (0..players.len()).filter(|&i| players[i].guest);
    let n = regulars.len();

    let mut solution = Vec::with_capacity(players.len());
    for i in 0..regular_block_count(players) {
        solution.push(regulars[i * 2]);
        solution.push(regulars[i * 2 + 1]);
        solution.push(regulars[n - 1 - i * 2]);
        solution.push(regulars[n - 2 - i * 2]);
    }
    let rest: Vec<usize> = regulars
        .iter()
        .copied()
        .filter(|i| !solution.contains(i))
        .collect();
    solution.extend(rest);
    solution.extend(guests);
    solution
}
