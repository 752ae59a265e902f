use serde::{Deserialize, Serialize};

use super::over::Overs;
use super::player::Player;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterStats {
    pub batter: Player,
    pub runs: u32,
    pub boundaries: u32,
    pub sixes: u32,
    pub balls_faced: u32,
}

impl BatterStats {
    /// Zero-valued line for a batter who has not faced yet.
    pub fn fresh(batter: Player) -> Self {
        Self { batter, runs: 0, boundaries: 0, sixes: 0, balls_faced: 0 }
    }

    pub fn strike_rate(&self) -> f32 {
        crate::stats::strike_rate(self)
    }
}

/// Stats of the two batters at the crease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattersStats {
    pub striker: BatterStats,
    pub non_striker: BatterStats,
}

impl BattersStats {
    pub fn swapped(self) -> Self {
        Self { striker: self.non_striker, non_striker: self.striker }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlerStats {
    pub bowler: Player,
    pub overs: Overs,
    pub maiden_overs: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy: f32,
}

impl BowlerStats {
    pub fn fresh(bowler: Player) -> Self {
        Self { bowler, overs: Overs::default(), maiden_overs: 0, runs: 0, wickets: 0, economy: 0.0 }
    }
}
