//! Padel league scheduler: library with models, configuration and the
//! fairness-driven pairing search.

pub mod config;
pub mod logic;
pub mod models;

pub use config::{CurveConfig, Normalization, SchedulerConfig, SearchLimits, TieBreak};
pub use logic::{
    build_initial_solution, build_matches_from_list, build_matches_from_list_12,
    estimate_partial_solution_weight, expand, generate_matching, generate_rounds, player_pair,
    player_rivals, score_match, score_player, sort_players_by_matches_played, MemoryTable,
    NodeItem, PairingMemory, PartitionCatalogue, PriorityQueue, ScoreMatrix, SearchContext,
    SearchOutcome, Weight,
};
pub use models::{
    GeneratedRound, LeagueId, Match, MatchId, Player, PlayerId, PlayerWithMatches, ScheduleError,
    ScheduleRequest, SetResult, TeamPair,
};
