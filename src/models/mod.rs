//! Data structures for the league scheduler: players, matches, requests and rounds.

mod game;
mod player;
mod schedule;

pub use game::{LeagueId, Match, MatchId, SetResult, TeamPair};
pub use player::{Player, PlayerId, PlayerWithMatches};
pub use schedule::{GeneratedRound, ScheduleError, ScheduleRequest};
