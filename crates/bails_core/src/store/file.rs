use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::debug;

use super::{InningsIndex, MatchId, MatchRecord, MatchStore};
use crate::error::StoreError;
use crate::models::Over;

pub const STORE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoredMatch {
    version: u32,
    match_id: MatchId,
    /// Unix milliseconds of the last write.
    updated_at: u64,
    record: MatchRecord,
}

/// One JSON document per match under a directory.
///
/// Writes go to a temporary file which is then renamed over the target, so a
/// reader sees either the previous record or the new one.
#[derive(Debug, Clone)]
pub struct FileMatchStore {
    dir: PathBuf,
}

impl FileMatchStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, match_id: MatchId) -> PathBuf {
        self.dir.join(format!("match_{}.json", match_id))
    }

    /// Ids of every stored match, oldest first.
    pub fn list(&self) -> Result<Vec<MatchId>, StoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else { continue };
            let id = name
                .strip_prefix("match_")
                .and_then(|rest| rest.strip_suffix(".json"))
                .and_then(|id| id.parse::<MatchId>().ok());
            if let Some(id) = id {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    pub fn delete(&self, match_id: MatchId) -> Result<(), StoreError> {
        let path = self.path_for(match_id);
        if path.exists() {
            fs::remove_file(&path)?;
            debug!(%match_id, "Deleted match record");
        }
        Ok(())
    }

    fn load(&self, match_id: MatchId) -> Result<Option<StoredMatch>, StoreError> {
        let path = self.path_for(match_id);
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(&path)?;
        let stored: StoredMatch = serde_json::from_slice(&data)?;
        if stored.version != STORE_FORMAT_VERSION || stored.match_id != match_id {
            return Err(StoreError::Corrupted { path: path.display().to_string() });
        }

        debug!(bytes = data.len(), path = %path.display(), "Loaded match record");
        Ok(Some(stored))
    }

    fn save(&self, stored: &StoredMatch) -> Result<(), StoreError> {
        let path = self.path_for(stored.match_id);
        let data = serde_json::to_vec_pretty(stored)?;
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &path)?;

        debug!(bytes = data.len(), path = %path.display(), "Saved match record");
        Ok(())
    }
}

impl MatchStore for FileMatchStore {
    fn put(
        &mut self,
        match_id: MatchId,
        innings: InningsIndex,
        overs: &[Over],
    ) -> Result<(), StoreError> {
        let mut record = self.load(match_id)?.map(|stored| stored.record).unwrap_or_default();
        record.set_innings(innings, overs);

        self.save(&StoredMatch {
            version: STORE_FORMAT_VERSION,
            match_id,
            updated_at: (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64,
            record,
        })
    }

    fn get(&self, match_id: MatchId) -> Result<MatchRecord, StoreError> {
        Ok(self.load(match_id)?.map(|stored| stored.record).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ball, Participants, Player};
    use tempfile::TempDir;

    fn over_with_four() -> Over {
        let at = Participants {
            bowler: Player::new("Archer"),
            striker: Player::new("Root"),
            non_striker: Player::new("Stokes"),
        };
        Over { balls: vec![Ball::Correct { runs: 4, at }] }
    }

    #[test]
    fn test_put_get_roundtrip_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let id = MatchId::from_millis(42);

        let first = vec![over_with_four()];

        let mut store = FileMatchStore::open(temp_dir.path()).unwrap();
        store.put(id, InningsIndex::First, &first).unwrap();

        let reopened = FileMatchStore::open(temp_dir.path()).unwrap();
        let record = reopened.get(id).unwrap();
        assert_eq!(record.first, Some(first));
        assert!(record.second.is_none());
    }

    #[test]
    fn test_second_innings_keeps_first() {
        let temp_dir = TempDir::new().unwrap();
        let id = MatchId::from_millis(43);
        let first = vec![over_with_four()];

        let mut store = FileMatchStore::open(temp_dir.path()).unwrap();
        store.put(id, InningsIndex::First, &first).unwrap();
        store.put(id, InningsIndex::Second, &[Over::new()]).unwrap();

        let record = store.get(id).unwrap();
        assert_eq!(record.first, Some(first));
        assert_eq!(record.second, Some(vec![Over::new()]));
        assert!(!temp_dir.path().join("match_43.tmp").exists());
    }

    #[test]
    fn test_missing_match_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileMatchStore::open(temp_dir.path().join("nested")).unwrap();
        assert!(store.get(MatchId::from_millis(1)).unwrap().is_empty());
    }

    #[test]
    fn test_list_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileMatchStore::open(temp_dir.path()).unwrap();
        for millis in [30, 10, 20] {
            store.put(MatchId::from_millis(millis), InningsIndex::First, &[]).unwrap();
        }
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let ids: Vec<u64> = store.list().unwrap().iter().map(MatchId::as_millis).collect();
        assert_eq!(ids, vec![10, 20, 30]);

        store.delete(MatchId::from_millis(20)).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_mismatched_id_is_corrupted() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileMatchStore::open(temp_dir.path()).unwrap();
        store.put(MatchId::from_millis(5), InningsIndex::First, &[]).unwrap();
        fs::rename(store.path_for(MatchId::from_millis(5)), store.path_for(MatchId::from_millis(6)))
            .unwrap();

        let err = store.get(MatchId::from_millis(6)).unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { .. }));
    }
}
