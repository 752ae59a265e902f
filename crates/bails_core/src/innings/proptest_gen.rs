//! Property-test generators for operator taps.
//!
//! A [`Tap`] names the dismissed batter by end rather than by id, so a
//! generated sequence can be replayed against any innings.

use proptest::prelude::*;

use super::InningsState;
use crate::models::{BallOutcome, MAX_RUNS_PER_BALL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tap {
    Dot,
    Correct(u8),
    Wide(u8),
    NoBall(u8),
    StrikerOut(u8),
    NonStrikerOut(u8),
}

impl Tap {
    pub fn outcome(self, innings: &InningsState) -> BallOutcome {
        match self {
            Tap::Dot => BallOutcome::Dot,
            Tap::Correct(runs) => BallOutcome::Correct { runs },
            Tap::Wide(runs) => BallOutcome::Wide { runs },
            Tap::NoBall(runs) => BallOutcome::NoBall { runs },
            Tap::StrikerOut(runs) => BallOutcome::Wicket {
                runs,
                out_player_id: innings.striker.id,
                new_player_name: "Next in".to_string(),
            },
            Tap::NonStrikerOut(runs) => BallOutcome::Wicket {
                runs,
                out_player_id: innings.non_striker.id,
                new_player_name: "Next in".to_string(),
            },
        }
    }

    pub fn is_legal(self) -> bool {
        !matches!(self, Tap::Wide(_) | Tap::NoBall(_))
    }
}

pub fn runs_strategy() -> impl Strategy<Value = u8> {
    0u8..=MAX_RUNS_PER_BALL
}

pub fn legal_tap_strategy() -> impl Strategy<Value = Tap> {
    prop_oneof![
        Just(Tap::Dot),
        runs_strategy().prop_map(Tap::Correct),
        runs_strategy().prop_map(Tap::StrikerOut),
        runs_strategy().prop_map(Tap::NonStrikerOut),
    ]
}

pub fn extra_tap_strategy() -> impl Strategy<Value = Tap> {
    prop_oneof![runs_strategy().prop_map(Tap::Wide), runs_strategy().prop_map(Tap::NoBall)]
}

pub fn tap_strategy() -> impl Strategy<Value = Tap> {
    prop_oneof![3 => legal_tap_strategy(), 1 => extra_tap_strategy()]
}
