use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ScorerState;
use crate::config::MatchConfig;
use crate::error::{Result, ScoringError};
use crate::models::{
    Ball, BallOutcome, BatterStats, BattersStats, BowlerStats, InningsSummary, Over, Overs,
    Participants, Player, PlayerId, BALLS_PER_OVER,
};
use crate::stats;

/// Names the operator enters when an innings starts. Blank names get the configured placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Openers {
    pub striker: String,
    pub non_striker: String,
    pub bowler: String,
}

/// Who bowls next: an existing bowler by id, else a new one by name, else a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlerSelection {
    #[serde(default)]
    pub id: Option<PlayerId>,
    #[serde(default)]
    pub name: Option<String>,
}

impl BowlerSelection {
    pub fn existing(id: PlayerId) -> Self {
        Self { id: Some(id), name: None }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { id: None, name: Some(name.into()) }
    }
}

/// Live state of the innings in progress.
///
/// Every operation reads `&self` and returns the next state, leaving the
/// receiver untouched; a rejected operation therefore never leaves a
/// half-applied state behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsState {
    /// Legal deliveries bowled so far.
    pub balls: u32,
    pub score: u32,
    pub wickets: u32,
    /// Append-only; the last over is the one in progress.
    pub overs: Vec<Over>,
    pub config: MatchConfig,
    pub striker: Player,
    pub non_striker: Player,
    pub bowler: Player,
    pub is_first_innings: bool,
    /// Runs needed to win. Only meaningful in the second innings.
    pub target_score: u32,
    pub does_won_match: bool,
    /// Set on the sixth legal ball of an over, cleared when the next over starts.
    pub is_over_completed: bool,
    pub batters_stats: BattersStats,
    pub bowler_stats: BowlerStats,
}

impl InningsState {
    pub fn first(config: MatchConfig, openers: &Openers) -> Self {
        Self::start(config, openers, true, 0)
    }

    pub fn second(config: MatchConfig, openers: &Openers, target_score: u32) -> Self {
        Self::start(config, openers, false, target_score)
    }

    fn start(
        config: MatchConfig,
        openers: &Openers,
        is_first_innings: bool,
        target_score: u32,
    ) -> Self {
        let striker = Player::named_or(&openers.striker, &config.unnamed_player);
        let non_striker = Player::named_or(&openers.non_striker, &config.unnamed_player);
        let bowler = Player::named_or(&openers.bowler, &config.unnamed_player);

        info!(
            first_innings = is_first_innings,
            target_score,
            total_overs = config.total_overs,
            "Innings started"
        );

        Self {
            balls: 0,
            score: 0,
            wickets: 0,
            overs: vec![Over::new()],
            batters_stats: BattersStats {
                striker: BatterStats::fresh(striker.clone()),
                non_striker: BatterStats::fresh(non_striker.clone()),
            },
            bowler_stats: BowlerStats::fresh(bowler.clone()),
            config,
            striker,
            non_striker,
            bowler,
            is_first_innings,
            target_score,
            does_won_match: false,
            is_over_completed: false,
        }
    }

    pub fn total_overs(&self) -> u32 {
        self.config.total_overs
    }

    pub fn participants(&self) -> Participants {
        Participants {
            bowler: self.bowler.clone(),
            striker: self.striker.clone(),
            non_striker: self.non_striker.clone(),
        }
    }

    /// Attach the players at the crease to what the operator tapped.
    pub fn ball(&self, outcome: BallOutcome) -> Ball {
        outcome.into_ball(self.participants())
    }

    pub fn current_over(&self) -> Option<&Over> {
        self.overs.last()
    }

    fn current_over_mut(&mut self) -> &mut Over {
        if self.overs.is_empty() {
            self.overs.push(Over::new());
        }
        let last = self.overs.len() - 1;
        &mut self.overs[last]
    }

    pub fn overs_bowled(&self) -> Overs {
        Overs::from_legal_deliveries(self.balls)
    }

    pub fn is_quota_exhausted(&self) -> bool {
        self.balls >= self.config.ball_quota()
    }

    pub fn is_all_out(&self) -> bool {
        self.config.all_out_wickets.is_some_and(|limit| self.wickets >= limit)
    }

    /// Runs still needed in a chase; `None` in the first innings.
    pub fn runs_required(&self) -> Option<u32> {
        if self.is_first_innings {
            None
        } else {
            Some(self.target_score.saturating_sub(self.score))
        }
    }

    /// Apply one delivery.
    ///
    /// Returns [`ScorerState::InningsBreak`] once the ball quota is used up or
    /// the side is all out.
    pub fn record_ball(&self, ball: Ball) -> Result<ScorerState> {
        ball.validate()?;
        if self.does_won_match {
            return Err(ScoringError::MatchAlreadyWon);
        }
        if self.is_over_completed {
            return Err(ScoringError::OverCompleted);
        }
        if *ball.participants() != self.participants() {
            return Err(ScoringError::ParticipantMismatch);
        }

        let mut next = self.clone();
        let runs = u32::from(ball.score());

        match &ball {
            Ball::Dot { .. } => {
                next.balls += 1;
            }
            Ball::Correct { .. } => {
                next.score += runs;
                next.balls += 1;
            }
            Ball::Wide { .. } | Ball::NoBall { .. } => {
                next.score += runs + 1;
            }
            Ball::Wicket { out_player_id, new_player_name, .. } => {
                let incoming = Player::named_or(new_player_name, &next.config.unnamed_player);
                if next.striker.is(*out_player_id) {
                    next.striker = incoming;
                } else if next.non_striker.is(*out_player_id) {
                    next.non_striker = incoming;
                } else {
                    return Err(ScoringError::UnknownBatter(*out_player_id));
                }
                next.wickets += 1;
                next.score += runs;
                next.balls += 1;
            }
        }

        let legal = ball.is_legal_delivery();
        debug!(
            kind = ball.kind(),
            runs,
            score = next.score,
            wickets = next.wickets,
            balls = next.balls,
            "Ball recorded"
        );
        next.current_over_mut().balls.push(ball);

        if runs % 2 == 1 {
            next.swap_ends();
        }

        if !next.is_first_innings && next.score >= next.target_score {
            info!(score = next.score, target = next.target_score, "Target reached");
            next.does_won_match = true;
        } else if legal && next.balls != 0 && next.balls % BALLS_PER_OVER == 0 {
            info!(overs = next.balls / BALLS_PER_OVER, "Over completed");
            next.is_over_completed = true;
        }

        next.refresh_stats();

        if next.is_quota_exhausted() || next.is_all_out() {
            info!(
                score = next.score,
                wickets = next.wickets,
                overs = %next.overs_bowled(),
                "Innings break"
            );
            return Ok(ScorerState::InningsBreak(next.summary()));
        }
        Ok(ScorerState::InningsRunning(next))
    }

    /// Open a new over with the selected bowler. The batters change ends.
    pub fn start_next_over(&self, selection: &BowlerSelection) -> Self {
        let mut next = self.clone();
        next.bowler = self.resolve_bowler(selection);
        next.swap_ends();
        next.overs.push(Over::new());
        next.is_over_completed = false;
        next.refresh_stats();

        info!(bowler = %next.bowler.name, over = next.overs.len(), "Next over started");
        next
    }

    /// Replace the bowler mid-over without rotating strike.
    pub fn change_bowler(&self, selection: &BowlerSelection) -> Self {
        let mut next = self.clone();
        next.bowler = self.resolve_bowler(selection);
        next.bowler_stats = stats::bowling_stats_for(&next.overs, &next.bowler);

        info!(bowler = %next.bowler.name, "Bowler changed");
        next
    }

    pub fn toggle_strike(&self) -> Self {
        let mut next = self.clone();
        std::mem::swap(&mut next.striker, &mut next.non_striker);
        next.batters_stats = next.batters_stats.swapped();
        next
    }

    /// Send in `new_batter_name` for a retiring batter. Not a wicket.
    pub fn retire_hurt(&self, batter_id: PlayerId, new_batter_name: &str) -> Result<Self> {
        let mut next = self.clone();
        let incoming = Player::named_or(new_batter_name, &next.config.unnamed_player);

        if next.striker.is(batter_id) {
            next.batters_stats.striker = BatterStats::fresh(incoming.clone());
            next.striker = incoming;
        } else if next.non_striker.is(batter_id) {
            next.batters_stats.non_striker = BatterStats::fresh(incoming.clone());
            next.non_striker = incoming;
        } else {
            return Err(ScoringError::UnknownBatter(batter_id));
        }

        info!(retired = %batter_id, "Batter retired hurt");
        Ok(next)
    }

    /// Freeze the innings: totals plus a line for every player who appeared.
    pub fn summary(&self) -> InningsSummary {
        let mut batters = stats::all_batters_stats(&self.overs);
        // the batter walking in after the last wicket never takes guard
        if !self.is_all_out() {
            for at_crease in [&self.striker, &self.non_striker] {
                if !batters.iter().any(|b| b.batter.id == at_crease.id) {
                    batters.push(BatterStats::fresh(at_crease.clone()));
                }
            }
        }

        InningsSummary {
            score: self.score,
            wickets: self.wickets,
            overs: self.overs_bowled(),
            overs_log: self.overs.clone(),
            batters,
            bowlers: stats::all_bowlers_stats(&self.overs),
        }
    }

    fn resolve_bowler(&self, selection: &BowlerSelection) -> Player {
        let known = selection.id.and_then(|id| {
            if self.bowler.is(id) {
                return Some(self.bowler.clone());
            }
            stats::bowlers_in(&self.overs).into_iter().find(|b| b.is(id))
        });

        known.unwrap_or_else(|| match &selection.name {
            Some(name) => Player::named_or(name, &self.config.unnamed_player),
            None => Player::new(self.config.unnamed_player.clone()),
        })
    }

    fn swap_ends(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    fn refresh_stats(&mut self) {
        self.bowler_stats = stats::bowling_stats_for(&self.overs, &self.bowler);
        self.batters_stats = BattersStats {
            striker: stats::batting_stats_for(&self.overs, &self.striker),
            non_striker: stats::batting_stats_for(&self.overs, &self.non_striker),
        };
    }
}
