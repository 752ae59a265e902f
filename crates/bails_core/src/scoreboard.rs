//! Read-only view of a stored match: both innings, the target and the result.

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::error::StoreError;
use crate::models::InningsSummary;
use crate::store::{MatchId, MatchRecord, MatchStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    InProgress,
    /// The side batting second reached the target.
    Chased { wickets_remaining: Option<u32> },
    /// The side batting second finished short by more than one run.
    Defended { margin_runs: u32 },
    Tied,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub match_id: MatchId,
    pub first: Option<InningsSummary>,
    pub second: Option<InningsSummary>,
    pub target: Option<u32>,
    pub outcome: MatchOutcome,
}

impl Scoreboard {
    pub fn load<S: MatchStore + ?Sized>(
        store: &S,
        match_id: MatchId,
        config: &MatchConfig,
    ) -> Result<Self, StoreError> {
        let record = store.get(match_id)?;
        Ok(Self::from_record(match_id, &record, config))
    }

    pub fn from_record(match_id: MatchId, record: &MatchRecord, config: &MatchConfig) -> Self {
        let first = record.first.as_deref().map(InningsSummary::from_overs);
        let second = record.second.as_deref().map(InningsSummary::from_overs);
        let target = first.as_ref().map(|summary| summary.score + 1);
        let outcome = match (&first, &second) {
            (Some(first), Some(second)) => outcome(first, second, config),
            _ => MatchOutcome::InProgress,
        };

        Self { match_id, first, second, target, outcome }
    }
}

/// Decide the result from both innings; the chase is over once the target
/// is reached, the ball quota is used or the side is all out.
pub fn outcome(
    first: &InningsSummary,
    second: &InningsSummary,
    config: &MatchConfig,
) -> MatchOutcome {
    let target = first.score + 1;
    if second.score >= target {
        let wickets_remaining =
            config.all_out_wickets.map(|limit| limit.saturating_sub(second.wickets));
        return MatchOutcome::Chased { wickets_remaining };
    }

    let quota_used = second.overs.legal_deliveries() >= config.ball_quota();
    let all_out = config.all_out_wickets.is_some_and(|limit| second.wickets >= limit);
    if !quota_used && !all_out {
        return MatchOutcome::InProgress;
    }

    if second.score == first.score {
        MatchOutcome::Tied
    } else {
        MatchOutcome::Defended { margin_runs: first.score - second.score }
    }
}

/// Plain-text scorecard, one line per batter and bowler.
pub fn render_scorecard(board: &Scoreboard) -> String {
    let header = format!("Match {} (started {})", board.match_id, board.match_id.started_at());
    let mut lines = vec![header];

    for (label, innings) in [("First", &board.first), ("Second", &board.second)] {
        match innings {
            Some(summary) => render_innings(&mut lines, label, summary),
            None => lines.push(format!("{label} innings: yet to bat")),
        }
    }

    if let Some(target) = board.target {
        lines.push(format!("Target: {target}"));
    }
    lines.push(format!("Result: {}", describe(board.outcome)));
    lines.join("\n")
}

fn render_innings(lines: &mut Vec<String>, label: &str, summary: &InningsSummary) {
    lines.push(format!(
        "{label} innings: {}/{} ({} ov)",
        summary.score, summary.wickets, summary.overs
    ));

    lines.push(format!(
        "  {:<16}{:>4}{:>4}{:>4}{:>4}{:>8}",
        "Batter", "R", "B", "4s", "6s", "SR"
    ));
    for b in &summary.batters {
        lines.push(format!(
            "  {:<16}{:>4}{:>4}{:>4}{:>4}{:>8.2}",
            b.batter.name,
            b.runs,
            b.balls_faced,
            b.boundaries,
            b.sixes,
            b.strike_rate()
        ));
    }
    lines.push(format!("  Extras: {}", summary.extras()));

    lines.push(format!(
        "  {:<16}{:>6}{:>4}{:>4}{:>4}{:>8}",
        "Bowler", "O", "M", "R", "W", "Econ"
    ));
    for b in &summary.bowlers {
        lines.push(format!(
            "  {:<16}{:>6}{:>4}{:>4}{:>4}{:>8.2}",
            b.bowler.name,
            b.overs.to_string(),
            b.maiden_overs,
            b.runs,
            b.wickets,
            b.economy
        ));
    }
}

fn describe(outcome: MatchOutcome) -> String {
    match outcome {
        MatchOutcome::InProgress => "in progress".to_string(),
        MatchOutcome::Chased { wickets_remaining: Some(w) } => {
            format!("chasing side won by {w} wickets")
        }
        MatchOutcome::Chased { wickets_remaining: None } => "chasing side won".to_string(),
        MatchOutcome::Defended { margin_runs } => {
            format!("defending side won by {margin_runs} runs")
        }
        MatchOutcome::Tied => "match tied".to_string(),
    }
}
