use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::models::PlayerResult;

use super::Leaderboard;

/// Storage for finished results.
pub trait RankingStore: Send {
    /// Insert a result and return the updated rankings.
    ///
    /// The in-memory board is updated even when persisting fails.
    fn add_result(&mut self, result: PlayerResult) -> Result<Vec<PlayerResult>, StoreError>;

    fn list_results(&self) -> Vec<PlayerResult>;

    /// Most results the store keeps.
    fn capacity(&self) -> usize;
}

/// Rankings that live for the current process only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    board: Leaderboard,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            board: Leaderboard::new(capacity),
        }
    }
}

impl RankingStore for MemoryStore {
    fn add_result(&mut self, result: PlayerResult) -> Result<Vec<PlayerResult>, StoreError> {
        Ok(self.board.add(result).to_vec())
    }

    fn list_results(&self) -> Vec<PlayerResult> {
        self.board.list().to_vec()
    }

    fn capacity(&self) -> usize {
        self.board.capacity()
    }
}

/// Rankings kept in a JSON file, rewritten after every insert.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    board: Leaderboard,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let board = match fs::read_to_string(&path) {
            Ok(content) => {
                let saved: Vec<PlayerResult> =
                    serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                        path: path.clone(),
                        source,
                    })?;
                let board = Leaderboard::from_results(capacity, saved);
                tracing::info!(path = %path.display(), entries = board.len(), "loaded rankings");
                board
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Leaderboard::new(capacity),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Self { path, board })
    }

    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self.board.list()).map_err(|source| {
            StoreError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl RankingStore for JsonFileStore {
    fn add_result(&mut self, result: PlayerResult) -> Result<Vec<PlayerResult>, StoreError> {
        let rankings = self.board.add(result).to_vec();
        self.save()?;
        Ok(rankings)
    }

    fn list_results(&self) -> Vec<PlayerResult> {
        self.board.list().to_vec()
    }

    fn capacity(&self) -> usize {
        self.board.capacity()
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use uuid::Uuid;

    use super::*;
    use crate::ranking::leaderboard::tests::result;

    fn temp_path() -> PathBuf {
        env::temp_dir().join(format!("trivia-rankings-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new(2);
        store.add_result(result("a", 100)).unwrap();
        store.add_result(result("b", 300)).unwrap();
        let rankings = store.add_result(result("c", 200)).unwrap();
        let names: Vec<&str> = rankings.iter().map(|r| r.nickname.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(store.list_results(), rankings);
        assert_eq!(store.capacity(), 2);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path();
        {
            let mut store = JsonFileStore::open(&path, 10).unwrap();
            assert!(store.list_results().is_empty());
            store.add_result(result("a", 100)).unwrap();
            store.add_result(result("b", 300)).unwrap();
        }

        let reopened = JsonFileStore::open(&path, 10).unwrap();
        let names: Vec<String> = reopened
            .list_results()
            .into_iter()
            .map(|r| r.nickname)
            .collect();
        assert_eq!(names, vec!["b", "a"]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let path = temp_path();
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path, 10),
            Err(StoreError::Corrupt { .. })
        ));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_failure_keeps_result_in_memory() {
        let dir = env::temp_dir().join(format!("trivia-missing-{}", Uuid::new_v4()));
        let mut store = JsonFileStore::open(dir.join("rankings.json"), 10).unwrap();
        let outcome = store.add_result(result("a", 100));
        assert!(matches!(outcome, Err(StoreError::Io { .. })));
        assert_eq!(store.list_results().len(), 1);
    }
}
