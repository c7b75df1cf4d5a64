//! Player (league participant) data structures.

use serde::{Deserialize, Serialize};

/// Opaque player identifier as handed over by the data-access layer.
pub type PlayerId = String;

/// A league participant available for scheduling.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub email: String,
    /// Guests fill a roster but never count toward official statistics.
    #[serde(default)]
    pub guest: bool,
}

impl Player {
    /// Create a regular (non-guest) player.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            guest: false,
        }
    }

    /// Create a guest player.
    pub fn guest(id: impl Into<PlayerId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            guest: true,
            ..Self::new(id, name, email)
        }
    }
}

/// A player annotated with how many official matches they have played so far.
/// Only produced while ordering a roster; never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerWithMatches {
    #[serde(flatten)]
    pub player: Player,
    pub played_matches: u32,
}
