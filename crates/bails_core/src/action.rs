//! Operator actions in serializable form.
//!
//! A [`ScorerAction`] is what a button press produces. Batters are named by
//! their end of the pitch and bowlers by id or name, so a sequence of actions
//! can be written down before any player ids exist.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::innings::{BowlerSelection, Openers};
use crate::models::{BallOutcome, PlayerId};
use crate::recorder::ScoreRecorder;
use crate::stats;
use crate::store::MatchStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatterEnd {
    Striker,
    NonStriker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScorerAction {
    Dot,
    Runs {
        runs: u8,
    },
    Wide {
        #[serde(default)]
        runs: u8,
    },
    NoBall {
        #[serde(default)]
        runs: u8,
    },
    Wicket {
        #[serde(default)]
        runs: u8,
        out: BatterEnd,
        new_batter: String,
    },
    Undo,
    NextOver {
        #[serde(default)]
        bowler_id: Option<PlayerId>,
        #[serde(default)]
        bowler: Option<String>,
    },
    ChangeBowler {
        #[serde(default)]
        bowler_id: Option<PlayerId>,
        #[serde(default)]
        bowler: Option<String>,
    },
    ToggleStrike,
    RetiredHurt {
        batter: BatterEnd,
        new_batter: String,
    },
    NextInnings {
        striker: String,
        non_striker: String,
        bowler: String,
    },
}

impl<S: MatchStore> ScoreRecorder<S> {
    /// Apply one operator action.
    ///
    /// Returns `false` only for an undo that had nothing to restore.
    pub fn dispatch(&mut self, action: ScorerAction) -> Result<bool> {
        match action {
            ScorerAction::Dot => self.record(BallOutcome::Dot).map(|_| true),
            ScorerAction::Runs { runs } => self.record(BallOutcome::Correct { runs }).map(|_| true),
            ScorerAction::Wide { runs } => self.record(BallOutcome::Wide { runs }).map(|_| true),
            ScorerAction::NoBall { runs } => {
                self.record(BallOutcome::NoBall { runs }).map(|_| true)
            }
            ScorerAction::Wicket { runs, out, new_batter } => {
                let out_player_id = self.batter_at(out)?;
                let outcome =
                    BallOutcome::Wicket { runs, out_player_id, new_player_name: new_batter };
                self.record(outcome).map(|_| true)
            }
            ScorerAction::Undo => self.undo(),
            ScorerAction::NextOver { bowler_id, bowler } => {
                let selection = self.bowler_selection(bowler_id, bowler)?;
                self.start_next_over(selection).map(|_| true)
            }
            ScorerAction::ChangeBowler { bowler_id, bowler } => {
                let selection = self.bowler_selection(bowler_id, bowler)?;
                self.change_bowler(selection).map(|_| true)
            }
            ScorerAction::ToggleStrike => self.toggle_strike().map(|_| true),
            ScorerAction::RetiredHurt { batter, new_batter } => {
                let batter_id = self.batter_at(batter)?;
                self.retire_hurt(batter_id, &new_batter).map(|_| true)
            }
            ScorerAction::NextInnings { striker, non_striker, bowler } => {
                self.start_next_innings(&Openers { striker, non_striker, bowler }).map(|_| true)
            }
        }
    }

    fn batter_at(&self, end: BatterEnd) -> Result<PlayerId> {
        let innings = self.running()?;
        Ok(match end {
            BatterEnd::Striker => innings.striker.id,
            BatterEnd::NonStriker => innings.non_striker.id,
        })
    }

    /// A bare name that matches a bowler already used this innings refers to that bowler.
    fn bowler_selection(
        &self,
        id: Option<PlayerId>,
        name: Option<String>,
    ) -> Result<BowlerSelection> {
        if id.is_some() {
            return Ok(BowlerSelection { id, name });
        }
        let innings = self.running()?;
        let known = name.as_deref().and_then(|name| {
            std::iter::once(innings.bowler.clone())
                .chain(stats::bowlers_in(&innings.overs))
                .find(|bowler| bowler.name == name)
        });
        Ok(match known {
            Some(bowler) => BowlerSelection::existing(bowler.id),
            None => BowlerSelection { id: None, name },
        })
    }
}
