//! Scoring session for one match.
//!
//! [`ScoreRecorder`] owns the live [`ScorerState`], the single-step undo
//! snapshot and the injected [`MatchStore`]. Every change to the ball log is
//! written through to the store before it is applied in memory, so the second
//! innings and the scoreboard can read it back by [`MatchId`].

use tracing::{debug, info, warn};

use crate::config::MatchConfig;
use crate::error::{Result, ScoringError};
use crate::innings::{BowlerSelection, InningsEvent, InningsState, Openers, ScorerState};
use crate::models::{Ball, BallOutcome, InningsSummary, PlayerId};
use crate::stats;
use crate::store::{InningsIndex, MatchId, MatchRecord, MatchStore};
use crate::undo::UndoBuffer;

pub struct ScoreRecorder<S: MatchStore> {
    match_id: MatchId,
    config: MatchConfig,
    innings: InningsIndex,
    /// Runs the chasing side needs; `None` during the first innings.
    target: Option<u32>,
    state: ScorerState,
    undo: UndoBuffer<InningsState>,
    store: S,
}

impl<S: MatchStore> ScoreRecorder<S> {
    /// Start the first innings of a new match under a freshly generated id.
    pub fn start_match(config: MatchConfig, mut store: S, openers: &Openers) -> Result<Self> {
        config.validate()?;
        let match_id = MatchId::generate();

        let state = ScorerState::InningsRunning(InningsState::first(config.clone(), openers));
        store.put(match_id, InningsIndex::First, state.overs())?;
        info!(%match_id, "Match started");

        Ok(Self {
            match_id,
            config,
            innings: InningsIndex::First,
            target: None,
            state,
            undo: UndoBuffer::new(),
            store,
        })
    }

    /// Start the chase of a match whose first innings is already in the store.
    ///
    /// Fails with [`ScoringError::SecondInningsExists`] rather than overwrite
    /// a chase that was stored earlier.
    pub fn resume_second_innings(
        config: MatchConfig,
        mut store: S,
        match_id: MatchId,
        openers: &Openers,
    ) -> Result<Self> {
        config.validate()?;
        let record = store.get(match_id)?;
        if record.second.is_some() {
            return Err(ScoringError::SecondInningsExists(match_id));
        }
        let target = target_of(&record, match_id)?;

        let state =
            ScorerState::InningsRunning(InningsState::second(config.clone(), openers, target));
        store.put(match_id, InningsIndex::Second, state.overs())?;
        info!(%match_id, target, "Second innings resumed");

        Ok(Self {
            match_id,
            config,
            innings: InningsIndex::Second,
            target: Some(target),
            state,
            undo: UndoBuffer::new(),
            store,
        })
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn innings(&self) -> InningsIndex {
        self.innings
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn state(&self) -> &ScorerState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The running innings, or [`ScoringError::InningsOver`] at a break.
    pub fn running(&self) -> Result<&InningsState> {
        self.state.as_running().ok_or(ScoringError::InningsOver)
    }

    /// Whether the chasing side has reached its target, including on the
    /// ball that ended the innings.
    pub fn is_match_won(&self) -> bool {
        match &self.state {
            ScorerState::InningsRunning(innings) => innings.does_won_match,
            ScorerState::InningsBreak(summary) => {
                self.target.is_some_and(|target| summary.score >= target)
            }
        }
    }

    /// Totals of the current innings, frozen or live.
    pub fn summary(&self) -> InningsSummary {
        match &self.state {
            ScorerState::InningsRunning(innings) => innings.summary(),
            ScorerState::InningsBreak(summary) => summary.clone(),
        }
    }

    pub fn record_ball(&mut self, ball: Ball) -> Result<&ScorerState> {
        self.apply(InningsEvent::RecordBall(ball))
    }

    /// Record what the operator tapped against the players currently at the crease.
    pub fn record(&mut self, outcome: BallOutcome) -> Result<&ScorerState> {
        let ball = self.running()?.ball(outcome);
        self.record_ball(ball)
    }

    pub fn start_next_over(&mut self, selection: BowlerSelection) -> Result<&ScorerState> {
        self.apply(InningsEvent::StartNextOver(selection))
    }

    pub fn change_bowler(&mut self, selection: BowlerSelection) -> Result<&ScorerState> {
        self.apply(InningsEvent::ChangeBowler(selection))
    }

    pub fn toggle_strike(&mut self) -> Result<&ScorerState> {
        self.apply(InningsEvent::ToggleStrike)
    }

    pub fn retire_hurt(
        &mut self,
        batter_id: PlayerId,
        new_batter_name: &str,
    ) -> Result<&ScorerState> {
        self.apply(InningsEvent::RetiredHurt {
            batter_id,
            new_batter_name: new_batter_name.to_string(),
        })
    }

    /// Whether [`Self::undo`] would restore anything.
    pub fn can_undo(&self) -> bool {
        if self.undo.is_empty() {
            return false;
        }
        match &self.state {
            ScorerState::InningsRunning(innings) => {
                innings.current_over().is_some_and(|over| !over.is_empty())
            }
            ScorerState::InningsBreak(_) => true,
        }
    }

    /// Restore the state from before the last recorded ball.
    ///
    /// Returns `false` without changing anything when the current over has no
    /// balls yet or the snapshot has already been used. A failed store write
    /// keeps the snapshot.
    pub fn undo(&mut self) -> Result<bool> {
        if !self.can_undo() {
            return Ok(false);
        }
        let Some(previous) = self.undo.peek() else {
            return Ok(false);
        };

        self.store.put(self.match_id, self.innings, &previous.overs)?;
        if let Some(previous) = self.undo.take() {
            self.state = ScorerState::InningsRunning(previous);
        }
        info!(match_id = %self.match_id, "Last ball undone");
        Ok(true)
    }

    /// Open the chase after the first innings break.
    pub fn start_next_innings(&mut self, openers: &Openers) -> Result<&ScorerState> {
        match (&self.state, self.innings) {
            (ScorerState::InningsBreak(_), InningsIndex::First) => {}
            (ScorerState::InningsBreak(_), InningsIndex::Second) => {
                return Err(ScoringError::MatchComplete)
            }
            (ScorerState::InningsRunning(_), _) => return Err(ScoringError::NotAtInningsBreak),
        }

        let target = target_of(&self.store.get(self.match_id)?, self.match_id)?;
        let next = ScorerState::InningsRunning(InningsState::second(
            self.config.clone(),
            openers,
            target,
        ));
        self.store.put(self.match_id, InningsIndex::Second, next.overs())?;

        self.state = next;
        self.innings = InningsIndex::Second;
        self.target = Some(target);
        self.undo.clear();

        info!(match_id = %self.match_id, target, "Second innings started");
        Ok(&self.state)
    }

    /// Run one event through the reducer and commit it once the store has it.
    fn apply(&mut self, event: InningsEvent) -> Result<&ScorerState> {
        let captures_undo = matches!(event, InningsEvent::RecordBall(_));
        let next = self.state.apply(event).map_err(|err| {
            if err.is_input_error() {
                warn!(match_id = %self.match_id, error = %err, "Action rejected");
            } else {
                debug!(match_id = %self.match_id, error = %err, "Action not allowed now");
            }
            err
        })?;

        self.store.put(self.match_id, self.innings, next.overs())?;

        if captures_undo {
            if let ScorerState::InningsRunning(current) = &self.state {
                self.undo.capture(current);
            }
        }
        self.state = next;
        Ok(&self.state)
    }
}

/// First-innings total plus one.
fn target_of(record: &MatchRecord, match_id: MatchId) -> Result<u32> {
    let first = record.first.as_deref().ok_or(ScoringError::MissingFirstInnings(match_id))?;
    Ok(stats::total_runs(first) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::Over;
    use crate::store::InMemoryMatchStore;
    use std::cell::Cell;
    use std::rc::Rc;

    /// In-memory store whose writes fail while `failing` is set.
    struct FlakyStore {
        inner: InMemoryMatchStore,
        failing: Rc<Cell<bool>>,
    }

    impl MatchStore for FlakyStore {
        fn put(
            &mut self,
            match_id: MatchId,
            innings: InningsIndex,
            overs: &[Over],
        ) -> std::result::Result<(), StoreError> {
            if self.failing.get() {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            self.inner.put(match_id, innings, overs)
        }

        fn get(&self, match_id: MatchId) -> std::result::Result<MatchRecord, StoreError> {
            self.inner.get(match_id)
        }
    }

    fn openers() -> Openers {
        Openers { striker: "Rohit".into(), non_striker: "Gill".into(), bowler: "Starc".into() }
    }

    fn five_over_match() -> ScoreRecorder<InMemoryMatchStore> {
        let config = MatchConfig::with_overs(5);
        ScoreRecorder::start_match(config, InMemoryMatchStore::new(), &openers()).unwrap()
    }

    fn one_over() -> MatchConfig {
        MatchConfig::with_overs(1)
    }

    fn running<S: MatchStore>(recorder: &ScoreRecorder<S>) -> &InningsState {
        recorder.running().unwrap()
    }

    #[test]
    fn test_undo_restores_previous_ball_once() {
        let mut recorder = five_over_match();
        recorder.record(BallOutcome::Correct { runs: 2 }).unwrap();
        let before = running(&recorder).clone();

        let wicket = BallOutcome::Wicket {
            runs: 1,
            out_player_id: before.striker.id,
            new_player_name: "Pant".into(),
        };
        recorder.record(wicket).unwrap();
        assert_eq!(running(&recorder).wickets, 1);

        assert!(recorder.undo().unwrap());
        let restored = running(&recorder);
        assert_eq!(restored.score, before.score);
        assert_eq!(restored.wickets, before.wickets);
        assert_eq!(restored.balls, before.balls);
        assert_eq!(restored.overs, before.overs);
        assert_eq!(restored.striker, before.striker);

        assert!(!recorder.undo().unwrap());
        assert_eq!(running(&recorder).score, 2);

        let stored = recorder.store().get(recorder.match_id()).unwrap();
        assert_eq!(stored.first.as_deref(), Some(before.overs.as_slice()));
    }

    #[test]
    fn test_undo_fails_on_fresh_over() {
        let mut recorder = five_over_match();
        assert!(!recorder.undo().unwrap());

        for _ in 0..6 {
            recorder.record(BallOutcome::Dot).unwrap();
        }
        recorder.start_next_over(BowlerSelection::named("Cummins")).unwrap();
        assert!(!recorder.can_undo());
        assert!(!recorder.undo().unwrap());
        assert_eq!(running(&recorder).balls, 6);
    }

    #[test]
    fn test_rejected_ball_keeps_earlier_snapshot() {
        let mut recorder = five_over_match();
        recorder.record(BallOutcome::Correct { runs: 4 }).unwrap();
        let err = recorder.record(BallOutcome::NoBall { runs: 8 }).unwrap_err();
        assert_eq!(err, ScoringError::InvalidRuns { runs: 8 });

        assert!(recorder.undo().unwrap());
        assert_eq!(running(&recorder).score, 0);
    }

    #[test]
    fn test_undo_reopens_innings_after_break() {
        let mut recorder =
            ScoreRecorder::start_match(one_over(), InMemoryMatchStore::new(), &openers()).unwrap();
        for _ in 0..6 {
            recorder.record(BallOutcome::Dot).unwrap();
        }
        assert!(recorder.state().is_innings_break());

        assert!(recorder.undo().unwrap());
        assert_eq!(running(&recorder).balls, 5);
    }

    #[test]
    fn test_full_match_through_the_store() {
        let mut store = InMemoryMatchStore::new();
        let mut recorder = ScoreRecorder::start_match(one_over(), &mut store, &openers()).unwrap();

        for runs in [4, 0, 6, 0, 0, 1] {
            recorder.record(BallOutcome::Correct { runs }).unwrap();
        }
        assert!(recorder.state().is_innings_break());
        assert_eq!(recorder.summary().score, 11);
        assert_eq!(recorder.record(BallOutcome::Dot).unwrap_err(), ScoringError::InningsOver);

        let chasers = Openers {
            striker: "Smith".into(),
            non_striker: "Warner".into(),
            bowler: "Bumrah".into(),
        };
        recorder.start_next_innings(&chasers).unwrap();
        assert_eq!(recorder.innings(), InningsIndex::Second);
        assert_eq!(running(&recorder).target_score, 12);

        recorder.record(BallOutcome::Correct { runs: 6 }).unwrap();
        recorder.record(BallOutcome::Wide { runs: 4 }).unwrap();
        recorder.record(BallOutcome::Correct { runs: 1 }).unwrap();
        assert!(recorder.is_match_won());
        assert_eq!(running(&recorder).score, 12);
        assert_eq!(recorder.record(BallOutcome::Dot).unwrap_err(), ScoringError::MatchAlreadyWon);
        assert_eq!(running(&recorder).balls, 2);

        assert_eq!(
            recorder.start_next_innings(&chasers).unwrap_err(),
            ScoringError::NotAtInningsBreak
        );

        let match_id = recorder.match_id();
        let record = store.get(match_id).unwrap();
        assert_eq!(stats::total_runs(record.first.as_deref().unwrap()), 11);
        assert_eq!(stats::total_runs(record.second.as_deref().unwrap()), 12);
    }

    #[test]
    fn test_second_innings_resumes_from_store() {
        let mut store = InMemoryMatchStore::new();
        let match_id = {
            let mut recorder =
                ScoreRecorder::start_match(one_over(), &mut store, &openers()).unwrap();
            recorder.record(BallOutcome::Correct { runs: 3 }).unwrap();
            recorder.record(BallOutcome::NoBall { runs: 0 }).unwrap();
            recorder.match_id()
        };

        let recorder =
            ScoreRecorder::resume_second_innings(one_over(), &mut store, match_id, &openers())
                .unwrap();
        assert_eq!(running(&recorder).target_score, 5);
        assert!(!running(&recorder).is_first_innings);
    }

    #[test]
    fn test_resume_without_first_innings_fails() {
        let missing = MatchId::from_millis(99);
        let err = ScoreRecorder::resume_second_innings(
            one_over(),
            InMemoryMatchStore::new(),
            missing,
            &openers(),
        )
        .err()
        .unwrap();
        assert_eq!(err, ScoringError::MissingFirstInnings(missing));
    }

    #[test]
    fn test_second_break_completes_match() {
        let mut recorder =
            ScoreRecorder::start_match(one_over(), InMemoryMatchStore::new(), &openers()).unwrap();
        for _ in 0..6 {
            recorder.record(BallOutcome::Correct { runs: 2 }).unwrap();
        }
        recorder.start_next_innings(&openers()).unwrap();
        for _ in 0..6 {
            recorder.record(BallOutcome::Dot).unwrap();
        }
        assert!(recorder.state().is_innings_break());
        let err = recorder.start_next_innings(&openers()).unwrap_err();
        assert_eq!(err, ScoringError::MatchComplete);
    }

    fn chasers() -> Openers {
        Openers { striker: "Smith".into(), non_striker: "Warner".into(), bowler: "Bumrah".into() }
    }

    #[test]
    fn test_chase_won_on_final_ball() {
        let mut recorder =
            ScoreRecorder::start_match(one_over(), InMemoryMatchStore::new(), &openers()).unwrap();
        recorder.record(BallOutcome::Correct { runs: 1 }).unwrap();
        for _ in 0..5 {
            recorder.record(BallOutcome::Dot).unwrap();
        }
        assert!(!recorder.is_match_won());

        recorder.start_next_innings(&chasers()).unwrap();
        assert_eq!(recorder.target(), Some(2));
        for _ in 0..5 {
            recorder.record(BallOutcome::Dot).unwrap();
        }
        recorder.record(BallOutcome::Correct { runs: 2 }).unwrap();

        assert!(recorder.state().is_innings_break());
        assert_eq!(recorder.summary().score, 2);
        assert!(recorder.is_match_won());
    }

    #[test]
    fn test_chase_won_on_all_out_ball() {
        let config = MatchConfig { all_out_wickets: Some(1), ..MatchConfig::with_overs(2) };
        let mut recorder =
            ScoreRecorder::start_match(config, InMemoryMatchStore::new(), &openers()).unwrap();
        recorder.record(BallOutcome::Correct { runs: 4 }).unwrap();
        let striker = running(&recorder).striker.id;
        let wicket =
            BallOutcome::Wicket { runs: 0, out_player_id: striker, new_player_name: "Pant".into() };
        recorder.record(wicket).unwrap();
        assert!(recorder.state().is_innings_break());

        recorder.start_next_innings(&chasers()).unwrap();
        recorder.record(BallOutcome::Correct { runs: 4 }).unwrap();
        let striker = running(&recorder).striker.id;
        let wicket =
            BallOutcome::Wicket { runs: 1, out_player_id: striker, new_player_name: "Head".into() };
        recorder.record(wicket).unwrap();

        assert!(recorder.state().is_innings_break());
        assert_eq!(recorder.summary().wickets, 1);
        assert!(recorder.is_match_won());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        for config in [MatchConfig::with_overs(0), MatchConfig::with_overs(u32::MAX)] {
            let err = ScoreRecorder::start_match(config, InMemoryMatchStore::new(), &openers())
                .err()
                .unwrap();
            assert!(matches!(err, ScoringError::InvalidConfig(_)));
        }

        let mut store = InMemoryMatchStore::new();
        let match_id = ScoreRecorder::start_match(one_over(), &mut store, &openers())
            .unwrap()
            .match_id();
        let err = ScoreRecorder::resume_second_innings(
            MatchConfig::with_overs(0),
            &mut store,
            match_id,
            &chasers(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, ScoringError::InvalidConfig(_)));
    }

    #[test]
    fn test_failed_write_leaves_state_untouched() {
        let failing = Rc::new(Cell::new(false));
        let store = FlakyStore { inner: InMemoryMatchStore::new(), failing: failing.clone() };
        let mut recorder = ScoreRecorder::start_match(one_over(), store, &openers()).unwrap();
        recorder.record(BallOutcome::Correct { runs: 2 }).unwrap();

        failing.set(true);
        let err = recorder.record(BallOutcome::Correct { runs: 4 }).unwrap_err();
        assert!(matches!(err, ScoringError::Store(_)));
        assert_eq!(running(&recorder).score, 2);
        assert_eq!(running(&recorder).balls, 1);

        assert!(recorder.undo().is_err());
        assert_eq!(running(&recorder).score, 2);
        assert!(recorder.can_undo());

        failing.set(false);
        assert!(recorder.undo().unwrap());
        assert_eq!(running(&recorder).score, 0);

        let stored = recorder.store().get(recorder.match_id()).unwrap();
        assert_eq!(stored.first.as_deref(), Some(running(&recorder).overs.as_slice()));
    }

    #[test]
    fn test_failed_write_keeps_first_innings_break() {
        let failing = Rc::new(Cell::new(false));
        let store = FlakyStore { inner: InMemoryMatchStore::new(), failing: failing.clone() };
        let mut recorder = ScoreRecorder::start_match(one_over(), store, &openers()).unwrap();
        for _ in 0..6 {
            recorder.record(BallOutcome::Dot).unwrap();
        }

        failing.set(true);
        assert!(recorder.start_next_innings(&chasers()).is_err());
        assert_eq!(recorder.innings(), InningsIndex::First);
        assert!(recorder.state().is_innings_break());
        assert_eq!(recorder.target(), None);
    }

    #[test]
    fn test_resume_refuses_to_overwrite_stored_chase() {
        let mut store = InMemoryMatchStore::new();
        let match_id = {
            let mut recorder =
                ScoreRecorder::start_match(one_over(), &mut store, &openers()).unwrap();
            for _ in 0..6 {
                recorder.record(BallOutcome::Correct { runs: 1 }).unwrap();
            }
            recorder.start_next_innings(&chasers()).unwrap();
            recorder.record(BallOutcome::Correct { runs: 4 }).unwrap();
            recorder.match_id()
        };

        let err =
            ScoreRecorder::resume_second_innings(one_over(), &mut store, match_id, &chasers())
                .err()
                .unwrap();
        assert_eq!(err, ScoringError::SecondInningsExists(match_id));

        let second = store.get(match_id).unwrap().second.unwrap();
        assert_eq!(stats::total_runs(&second), 4);
    }
}
