//! # bails_core - Ball-by-Ball Cricket Scoring Engine
//!
//! This library records a limited-overs cricket match one delivery at a time
//! and derives every total from the ball log.
//!
//! ## Features
//! - Pure innings reducer (same events = same state)
//! - Batting and bowling figures recomputed from the recorded balls
//! - Single-step undo of the last recorded ball
//! - Pluggable match storage (in-memory or JSON files)
//! - Scoreboard with target and result

pub mod action;
pub mod config;
pub mod error;
pub mod innings;
pub mod models;
pub mod recorder;
pub mod scoreboard;
pub mod stats;
pub mod store;
pub mod undo;

pub use error::{ConfigError, Result, ScoringError, StoreError};

// Re-export the scoring surface
pub use action::{BatterEnd, ScorerAction};
pub use config::{MatchConfig, MATCH_CONFIG_PATH_ENV};
pub use innings::{BowlerSelection, InningsEvent, InningsState, Openers, ScorerState};
pub use recorder::ScoreRecorder;

// Re-export domain models
pub use models::{
    Ball, BallOutcome, BatterStats, BowlerStats, InningsSummary, Over, Overs, Participants,
    Player, PlayerId,
};

// Re-export storage and read side
pub use scoreboard::{render_scorecard, MatchOutcome, Scoreboard};
pub use store::{
    FileMatchStore, InMemoryMatchStore, InningsIndex, MatchId, MatchRecord, MatchStore,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
