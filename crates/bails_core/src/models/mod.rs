pub mod ball;
pub mod over;
pub mod player;
pub mod stats;
pub mod summary;

pub use ball::{Ball, BallOutcome, Participants, MAX_RUNS_PER_BALL};
pub use over::{Over, Overs, BALLS_PER_OVER};
pub use player::{Player, PlayerId};
pub use stats::{BatterStats, BattersStats, BowlerStats};
pub use summary::InningsSummary;
