use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a batter or bowler. Allocated once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A batter or bowler as the scorer knows them: an id and a display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a player with a freshly allocated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: PlayerId::new(), name: name.into() }
    }

    /// Create a player, substituting `fallback` for a blank name.
    pub fn named_or(name: &str, fallback: &str) -> Self {
        let name = name.trim();
        if name.is_empty() {
            Self::new(fallback)
        } else {
            Self::new(name)
        }
    }

    pub fn is(&self, id: PlayerId) -> bool {
        self.id == id
    }
}
