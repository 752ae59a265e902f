use serde::{Deserialize, Serialize};

use super::over::{Over, Overs};
use super::stats::{BatterStats, BowlerStats};
use crate::stats;

/// Frozen totals and per-player lines of one innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsSummary {
    pub score: u32,
    pub wickets: u32,
    pub overs: Overs,
    pub overs_log: Vec<Over>,
    pub batters: Vec<BatterStats>,
    pub bowlers: Vec<BowlerStats>,
}

impl InningsSummary {
    /// Rebuild a summary from a stored ball log.
    pub fn from_overs(overs_log: &[Over]) -> Self {
        Self {
            score: stats::total_runs(overs_log),
            wickets: stats::total_wickets(overs_log),
            overs: Overs::from_legal_deliveries(stats::legal_deliveries(overs_log)),
            overs_log: overs_log.to_vec(),
            batters: stats::all_batters_stats(overs_log),
            bowlers: stats::all_bowlers_stats(overs_log),
        }
    }

    pub fn extras(&self) -> u32 {
        let off_the_bat: u32 = self.batters.iter().map(|b| b.runs).sum();
        self.score.saturating_sub(off_the_bat)
    }
}
