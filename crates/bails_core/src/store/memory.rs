use std::collections::HashMap;

use super::{InningsIndex, MatchId, MatchRecord, MatchStore};
use crate::error::StoreError;
use crate::models::Over;

/// Process-lifetime store; everything is lost when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMatchStore {
    matches: HashMap<MatchId, MatchRecord>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl MatchStore for InMemoryMatchStore {
    fn put(
        &mut self,
        match_id: MatchId,
        innings: InningsIndex,
        overs: &[Over],
    ) -> Result<(), StoreError> {
        self.matches.entry(match_id).or_default().set_innings(innings, overs);
        Ok(())
    }

    fn get(&self, match_id: MatchId) -> Result<MatchRecord, StoreError> {
        Ok(self.matches.get(&match_id).cloned().unwrap_or_default())
    }
}
