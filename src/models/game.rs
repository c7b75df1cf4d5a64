//! Match, TeamPair and set results for doubles games.

use crate::models::player::Player;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Opaque league identifier, passed through to generated matches.
pub type LeagueId = String;

/// One doubles team: drive and reverse side.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamPair {
    pub drive: Player,
    pub reverse: Player,
}

impl TeamPair {
    pub fn new(drive: Player, reverse: Player) -> Self {
        Self { drive, reverse }
    }

    pub fn has_guest(&self) -> bool {
        self.drive.guest || self.reverse.guest
    }
}

/// Result of a single set, appended by the results collaborator after play.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetResult {
    pub set_number: u32,
    pub local_score: u32,
    pub visitor_score: u32,
    pub local_wins: bool,
    #[serde(default)]
    pub local_tie_break: Option<u32>,
    #[serde(default)]
    pub visitor_tie_break: Option<u32>,
}

/// A doubles match between a local and a visitor team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub league_id: LeagueId,
    pub id: MatchId,
    pub team_local: TeamPair,
    pub team_visitor: TeamPair,
    pub date: DateTime<Utc>,
    /// None until the match has been played.
    #[serde(default)]
    pub local_wins: Option<bool>,
    #[serde(default)]
    pub results: Vec<SetResult>,
    pub finished: bool,
    pub confirmed: bool,
    pub round: u32,
    /// False as soon as any of the four players is a guest.
    pub official: bool,
}

impl Match {
    /// A freshly scheduled match: unplayed, unconfirmed, no results.
    pub fn new(
        league_id: impl Into<LeagueId>,
        team_local: TeamPair,
        team_visitor: TeamPair,
        date: DateTime<Utc>,
        round: u32,
    ) -> Self {
        let official = !(team_local.has_guest() || team_visitor.has_guest());
        Self {
            league_id: league_id.into(),
            id: Uuid::new_v4(),
            team_local,
            team_visitor,
            date,
            local_wins: None,
            results: Vec::new(),
            finished: false,
            confirmed: false,
            round,
            official,
        }
    }

    /// Whether this match feeds the pairing memory (played and guest-free).
    pub fn counts_for_history(&self) -> bool {
        self.finished && self.official
    }

    /// The four players in slot order: local drive, local reverse, visitor drive, visitor reverse.
    pub fn players(&self) -> [&Player; 4] {
        [
            &self.team_local.drive,
            &self.team_local.reverse,
            &self.team_visitor.drive,
            &self.team_visitor.reverse,
        ]
    }

    pub fn guest_count(&self) -> usize {
        self.players().iter().filter(|p| p.guest).count()
    }
}
