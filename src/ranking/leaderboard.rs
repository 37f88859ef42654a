use uuid::Uuid;

use crate::models::PlayerResult;

/// Default number of entries kept.
pub const MAX_RANKINGS: usize = 10;

/// Results ordered by score, best first, capped at `capacity`.
///
/// Equal scores keep their insertion order, so a newcomer tied with the
/// lowest entry of a full board is the one dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<PlayerResult>,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity + 1),
        }
    }

    /// Build a board from existing results, keeping the best `capacity`.
    pub fn from_results<I>(capacity: usize, results: I) -> Self
    where
        I: IntoIterator<Item = PlayerResult>,
    {
        let mut board = Self::new(capacity);
        for result in results {
            board.add(result);
        }
        board
    }

    pub fn add(&mut self, result: PlayerResult) -> &[PlayerResult] {
        self.entries.push(result);
        // `sort_by` is stable.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
        &self.entries
    }

    pub fn list(&self) -> &[PlayerResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 0-based rank of a session, if it made the board.
    pub fn position_of(&self, session_id: Uuid) -> Option<usize> {
        self.entries.iter().position(|r| r.session_id == session_id)
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(MAX_RANKINGS)
    }
}
