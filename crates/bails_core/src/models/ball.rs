use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};
use crate::error::ScoringError;

/// Most runs a single delivery can be credited with.
pub const MAX_RUNS_PER_BALL: u8 = 6;

/// The bowler and the two batters at the crease when a ball was bowled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participants {
    pub bowler: Player,
    pub striker: Player,
    pub non_striker: Player,
}

/// One delivery, classified by its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Ball {
    Dot {
        #[serde(flatten)]
        at: Participants,
    },
    Correct {
        runs: u8,
        #[serde(flatten)]
        at: Participants,
    },
    Wide {
        runs: u8,
        #[serde(flatten)]
        at: Participants,
    },
    NoBall {
        runs: u8,
        #[serde(flatten)]
        at: Participants,
    },
    Wicket {
        runs: u8,
        out_player_id: PlayerId,
        new_player_name: String,
        #[serde(flatten)]
        at: Participants,
    },
}

impl Ball {
    pub fn participants(&self) -> &Participants {
        match self {
            Ball::Dot { at }
            | Ball::Correct { at, .. }
            | Ball::Wide { at, .. }
            | Ball::NoBall { at, .. }
            | Ball::Wicket { at, .. } => at,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Ball::Dot { .. } => "dot",
            Ball::Correct { .. } => "correct",
            Ball::Wide { .. } => "wide",
            Ball::NoBall { .. } => "no_ball",
            Ball::Wicket { .. } => "wicket",
        }
    }

    /// Runs actually run (or hit) off the ball, excluding the extra for a wide or no-ball.
    pub fn score(&self) -> u8 {
        match self {
            Ball::Dot { .. } => 0,
            Ball::Correct { runs, .. }
            | Ball::Wide { runs, .. }
            | Ball::NoBall { runs, .. }
            | Ball::Wicket { runs, .. } => *runs,
        }
    }

    /// Runs charged to the bowler and added to the team total.
    pub fn runs_conceded(&self) -> u32 {
        let extra = if self.is_legal_delivery() { 0 } else { 1 };
        u32::from(self.score()) + extra
    }

    /// Legal deliveries count toward the six-ball over; wides and no-balls do not.
    pub fn is_legal_delivery(&self) -> bool {
        matches!(self, Ball::Dot { .. } | Ball::Correct { .. } | Ball::Wicket { .. })
    }

    /// Whether the striker is charged with facing this ball. Only wides are not faced.
    pub fn is_faced(&self) -> bool {
        !matches!(self, Ball::Wide { .. })
    }

    pub fn is_wicket(&self) -> bool {
        matches!(self, Ball::Wicket { .. })
    }

    pub fn bowler(&self) -> &Player {
        &self.participants().bowler
    }

    pub fn striker(&self) -> &Player {
        &self.participants().striker
    }

    pub fn non_striker(&self) -> &Player {
        &self.participants().non_striker
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        let runs = self.score();
        if runs > MAX_RUNS_PER_BALL {
            return Err(ScoringError::InvalidRuns { runs });
        }
        Ok(())
    }
}

/// What the operator tapped, before the players at the crease are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BallOutcome {
    Dot,
    Correct { runs: u8 },
    Wide { runs: u8 },
    NoBall { runs: u8 },
    Wicket { runs: u8, out_player_id: PlayerId, new_player_name: String },
}

impl BallOutcome {
    pub fn into_ball(self, at: Participants) -> Ball {
        match self {
            BallOutcome::Dot => Ball::Dot { at },
            BallOutcome::Correct { runs } => Ball::Correct { runs, at },
            BallOutcome::Wide { runs } => Ball::Wide { runs, at },
            BallOutcome::NoBall { runs } => Ball::NoBall { runs, at },
            BallOutcome::Wicket { runs, out_player_id, new_player_name } => {
                Ball::Wicket { runs, out_player_id, new_player_name, at }
            }
        }
    }
}
