//! Innings state machine.
//!
//! [`ScorerState`] is either an innings in progress or the frozen summary of
//! one that has ended. [`ScorerState::apply`] is the reducer: it takes one
//! operator event and yields the next state without touching the current one.

mod state;

#[cfg(test)]
pub(crate) mod proptest_gen;

use serde::{Deserialize, Serialize};

pub use state::{BowlerSelection, InningsState, Openers};

use crate::error::{Result, ScoringError};
use crate::models::{Ball, InningsSummary, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScorerState {
    InningsRunning(InningsState),
    InningsBreak(InningsSummary),
}

/// One operator action against a running innings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InningsEvent {
    RecordBall(Ball),
    StartNextOver(BowlerSelection),
    ChangeBowler(BowlerSelection),
    ToggleStrike,
    RetiredHurt { batter_id: PlayerId, new_batter_name: String },
}

impl ScorerState {
    pub fn apply(&self, event: InningsEvent) -> Result<ScorerState> {
        let ScorerState::InningsRunning(innings) = self else {
            return Err(ScoringError::InningsOver);
        };

        let next = match event {
            InningsEvent::RecordBall(ball) => return innings.record_ball(ball),
            InningsEvent::StartNextOver(selection) => innings.start_next_over(&selection),
            InningsEvent::ChangeBowler(selection) => innings.change_bowler(&selection),
            InningsEvent::ToggleStrike => innings.toggle_strike(),
            InningsEvent::RetiredHurt { batter_id, new_batter_name } => {
                innings.retire_hurt(batter_id, &new_batter_name)?
            }
        };
        Ok(ScorerState::InningsRunning(next))
    }

    pub fn as_running(&self) -> Option<&InningsState> {
        match self {
            ScorerState::InningsRunning(innings) => Some(innings),
            ScorerState::InningsBreak(_) => None,
        }
    }

    pub fn as_break(&self) -> Option<&InningsSummary> {
        match self {
            ScorerState::InningsBreak(summary) => Some(summary),
            ScorerState::InningsRunning(_) => None,
        }
    }

    pub fn is_innings_break(&self) -> bool {
        matches!(self, ScorerState::InningsBreak(_))
    }

    /// The ball log so far, whichever phase the innings is in.
    pub fn overs(&self) -> &[crate::models::Over] {
        match self {
            ScorerState::InningsRunning(innings) => &innings.overs,
            ScorerState::InningsBreak(summary) => &summary.overs_log,
        }
    }
}
