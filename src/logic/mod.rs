//! Scheduling logic: pairing memory, roster ordering, scoring, branch-and-bound
//! search and round orchestration.

mod memory_table;
mod ordering;
mod partition;
mod queue;
mod rounds;
mod scoring;
mod search;
mod slots;

pub use memory_table::{MemoryTable, PairingMemory};
pub use ordering::{build_initial_solution, regular_block_count, sort_players_by_matches_played};
pub use partition::{
    build_matches_from_list_12, build_matches_with_partitions, Partition, PartitionCatalogue,
    PartitionSet,
};
pub use queue::{PriorityQueue, TieRank};
pub use rounds::{build_matches_from_list, generate_rounds, validate_roster};
pub use scoring::{
    estimate_partial_solution_weight, improves, score_match, score_player, solution_score,
    ScoreMatrix, Weight, SCORE_EPSILON,
};
pub use search::{expand, generate_matching, is_permutation, NodeItem, SearchContext, SearchOutcome};
pub use slots::{block_count, block_slots, player_pair, player_rivals, SLOTS_PER_MATCH};
