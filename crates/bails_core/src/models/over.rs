use serde::{Deserialize, Serialize};
use std::fmt;

use super::ball::Ball;

/// Legal deliveries in a complete over.
pub const BALLS_PER_OVER: u32 = 6;

/// Balls bowled consecutively from one end, in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Over {
    pub balls: Vec<Ball>,
}

impl Over {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn legal_deliveries(&self) -> u32 {
        self.balls.iter().filter(|b| b.is_legal_delivery()).count() as u32
    }

    /// An over is complete once six legal balls have been bowled in it.
    pub fn is_complete(&self) -> bool {
        self.legal_deliveries() >= BALLS_PER_OVER
    }

    pub fn runs_conceded(&self) -> u32 {
        self.balls.iter().map(Ball::runs_conceded).sum()
    }
}

/// Overs in cricket notation: `4.3` is four overs and three balls, not a decimal fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Overs {
    pub completed: u32,
    /// Legal balls of the unfinished over, always below [`BALLS_PER_OVER`].
    pub balls: u32,
}

impl Overs {
    pub fn from_legal_deliveries(deliveries: u32) -> Self {
        Self { completed: deliveries / BALLS_PER_OVER, balls: deliveries % BALLS_PER_OVER }
    }

    pub fn legal_deliveries(&self) -> u32 {
        self.completed * BALLS_PER_OVER + self.balls
    }

    pub fn as_f32(&self) -> f32 {
        self.completed as f32 + self.balls as f32 * 0.1
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.completed, self.balls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overs_notation() {
        let overs = Overs::from_legal_deliveries(27);
        assert_eq!(overs, Overs { completed: 4, balls: 3 });
        assert_eq!(overs.to_string(), "4.3");
        assert!((overs.as_f32() - 4.3).abs() < 1e-5);
        assert_eq!(overs.legal_deliveries(), 27);
    }

    #[test]
    fn test_six_balls_roll_into_a_whole_over() {
        assert_eq!(Overs::from_legal_deliveries(6).to_string(), "1.0");
        assert_eq!(Overs::from_legal_deliveries(0).to_string(), "0.0");
    }
}
