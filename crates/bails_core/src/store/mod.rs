//! Match summary storage.
//!
//! The scorer writes each innings' ball log through a [`MatchStore`] keyed by
//! [`MatchId`]; the second innings and the scoreboard read it back. Backends
//! are injected, so the caller decides whether a match outlives the process.

mod file;
mod memory;

use serde::{Deserialize, Serialize};
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub use file::FileMatchStore;
pub use memory::InMemoryMatchStore;

use crate::error::StoreError;
use crate::models::Over;

/// Identifies one match: the unix time in milliseconds at which it was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(u64);

impl MatchId {
    pub fn generate() -> Self {
        Self((OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64)
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Start time as RFC 3339, or `"Unknown"` if the id is out of range.
    pub fn started_at(&self) -> String {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.0) * 1_000_000)
            .ok()
            .and_then(|t| t.format(&Rfc3339).ok())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MatchId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsIndex {
    First,
    Second,
}

/// Ball logs stored for one match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default)]
    pub first: Option<Vec<Over>>,
    #[serde(default)]
    pub second: Option<Vec<Over>>,
}

impl MatchRecord {
    pub fn innings(&self, index: InningsIndex) -> Option<&[Over]> {
        match index {
            InningsIndex::First => self.first.as_deref(),
            InningsIndex::Second => self.second.as_deref(),
        }
    }

    pub fn set_innings(&mut self, index: InningsIndex, overs: &[Over]) {
        let slot = match index {
            InningsIndex::First => &mut self.first,
            InningsIndex::Second => &mut self.second,
        };
        *slot = Some(overs.to_vec());
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }
}

/// Keyed storage of innings ball logs.
pub trait MatchStore {
    /// Replace the stored log of one innings.
    fn put(
        &mut self,
        match_id: MatchId,
        innings: InningsIndex,
        overs: &[Over],
    ) -> Result<(), StoreError>;

    /// Both innings of a match; an unknown match yields an empty record.
    fn get(&self, match_id: MatchId) -> Result<MatchRecord, StoreError>;
}

impl<S: MatchStore + ?Sized> MatchStore for &mut S {
    fn put(
        &mut self,
        match_id: MatchId,
        innings: InningsIndex,
        overs: &[Over],
    ) -> Result<(), StoreError> {
        (**self).put(match_id, innings, overs)
    }

    fn get(&self, match_id: MatchId) -> Result<MatchRecord, StoreError> {
        (**self).get(match_id)
    }
}

impl<S: MatchStore + ?Sized> MatchStore for Box<S> {
    fn put(
        &mut self,
        match_id: MatchId,
        innings: InningsIndex,
        overs: &[Over],
    ) -> Result<(), StoreError> {
        (**self).put(match_id, innings, overs)
    }

    fn get(&self, match_id: MatchId) -> Result<MatchRecord, StoreError> {
        (**self).get(match_id)
    }
}
