//! Statistics derived from an innings' ball log.
//!
//! Every function here is a pure read over `&[Over]`: nothing is cached and
//! the log is never mutated, so the same log always yields the same numbers.
//! An empty log yields zero-valued stats.

use crate::models::{
    Ball, BatterStats, BowlerStats, Over, Overs, Player, PlayerId, BALLS_PER_OVER,
};

pub fn is_legal_delivery(ball: &Ball) -> bool {
    ball.is_legal_delivery()
}

fn all_balls(overs: &[Over]) -> impl Iterator<Item = &Ball> {
    overs.iter().flat_map(|over| over.balls.iter())
}

fn balls_bowled_by(overs: &[Over], bowler: PlayerId) -> impl Iterator<Item = &Ball> {
    all_balls(overs).filter(move |ball| ball.bowler().is(bowler))
}

fn balls_faced_by(overs: &[Over], batter: PlayerId) -> impl Iterator<Item = &Ball> {
    all_balls(overs).filter(move |ball| ball.striker().is(batter) && ball.is_faced())
}

/// Round half away from zero to `decimals` places.
pub fn round_to_decimals(value: f32, decimals: u32) -> f32 {
    let factor = 10f32.powi(decimals as i32);
    (value * factor).round() / factor
}

pub fn legal_deliveries(overs: &[Over]) -> u32 {
    all_balls(overs).filter(|b| b.is_legal_delivery()).count() as u32
}

pub fn total_runs(overs: &[Over]) -> u32 {
    all_balls(overs).map(Ball::runs_conceded).sum()
}

pub fn total_wickets(overs: &[Over]) -> u32 {
    all_balls(overs).filter(|b| b.is_wicket()).count() as u32
}

pub fn legal_deliveries_by(overs: &[Over], bowler: PlayerId) -> u32 {
    balls_bowled_by(overs, bowler).filter(|b| b.is_legal_delivery()).count() as u32
}

pub fn overs_bowled_by(overs: &[Over], bowler: PlayerId) -> Overs {
    Overs::from_legal_deliveries(legal_deliveries_by(overs, bowler))
}

/// Complete overs bowled entirely by `bowler` that conceded nothing, extras included.
pub fn maiden_overs_by(overs: &[Over], bowler: PlayerId) -> u32 {
    overs
        .iter()
        .filter(|over| {
            over.is_complete()
                && over.balls.iter().all(|b| b.bowler().is(bowler) && b.runs_conceded() == 0)
        })
        .count() as u32
}

pub fn runs_conceded_by(overs: &[Over], bowler: PlayerId) -> u32 {
    balls_bowled_by(overs, bowler).map(Ball::runs_conceded).sum()
}

/// Runs conceded per six legal balls, to two decimals. Zero until a legal ball is bowled.
pub fn economy_of(overs: &[Over], bowler: PlayerId) -> f32 {
    let deliveries = legal_deliveries_by(overs, bowler);
    if deliveries == 0 {
        return 0.0;
    }
    let runs = runs_conceded_by(overs, bowler);
    let economy = f64::from(runs) * f64::from(BALLS_PER_OVER) / f64::from(deliveries);
    round_to_decimals(economy as f32, 2)
}

pub fn wickets_taken_by(overs: &[Over], bowler: PlayerId) -> u32 {
    balls_bowled_by(overs, bowler).filter(|b| b.is_wicket()).count() as u32
}

pub fn bowling_stats_for(overs: &[Over], bowler: &Player) -> BowlerStats {
    BowlerStats {
        bowler: bowler.clone(),
        overs: overs_bowled_by(overs, bowler.id),
        maiden_overs: maiden_overs_by(overs, bowler.id),
        runs: runs_conceded_by(overs, bowler.id),
        wickets: wickets_taken_by(overs, bowler.id),
        economy: economy_of(overs, bowler.id),
    }
}

/// Runs off the bat, boundaries and balls faced while `batter` was on strike.
///
/// Wides are credited to the team, not the batter, and are not counted as faced.
/// No-balls are faced and their runs belong to the batter.
pub fn batting_stats_for(overs: &[Over], batter: &Player) -> BatterStats {
    let mut stats = BatterStats::fresh(batter.clone());
    for ball in balls_faced_by(overs, batter.id) {
        let runs = ball.score();
        stats.runs += u32::from(runs);
        stats.balls_faced += 1;
        match runs {
            4 => stats.boundaries += 1,
            6 => stats.sixes += 1,
            _ => {}
        }
    }
    stats
}

pub fn strike_rate(stats: &BatterStats) -> f32 {
    if stats.balls_faced == 0 {
        return 0.0;
    }
    round_to_decimals(stats.runs as f32 / stats.balls_faced as f32 * 100.0, 2)
}

/// Every batter seen at the crease, in order of first appearance.
pub fn batters_in(overs: &[Over]) -> Vec<Player> {
    let mut seen: Vec<Player> = Vec::new();
    for ball in all_balls(overs) {
        for batter in [ball.striker(), ball.non_striker()] {
            if !seen.iter().any(|p| p.id == batter.id) {
                seen.push(batter.clone());
            }
        }
    }
    seen
}

/// Every bowler who bowled a ball, in order of first appearance.
pub fn bowlers_in(overs: &[Over]) -> Vec<Player> {
    let mut seen: Vec<Player> = Vec::new();
    for ball in all_balls(overs) {
        if !seen.iter().any(|p| p.id == ball.bowler().id) {
            seen.push(ball.bowler().clone());
        }
    }
    seen
}

pub fn all_batters_stats(overs: &[Over]) -> Vec<BatterStats> {
    batters_in(overs).iter().map(|batter| batting_stats_for(overs, batter)).collect()
}

pub fn all_bowlers_stats(overs: &[Over]) -> Vec<BowlerStats> {
    bowlers_in(overs).iter().map(|bowler| bowling_stats_for(overs, bowler)).collect()
}
