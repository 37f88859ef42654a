use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// One answered (or timed out) question. Appended once, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: u32,
    /// `None` means the timer ran out. Stored as `-1` on disk.
    #[serde(with = "selection")]
    pub selected: Option<usize>,
    pub correct: bool,
    pub score: u32,
    /// Seconds left on the clock when the answer was recorded.
    pub time_remaining: u32,
}

impl AnswerRecord {
    pub fn timed_out(&self) -> bool {
        self.selected.is_none()
    }
}

/// Per-category view over the answer history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub correct: usize,
    pub total: usize,
    pub score: u32,
}

/// Summary of a finished session, the unit stored on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub session_id: Uuid,
    pub nickname: String,
    pub score: u32,
    pub correct_count: usize,
    pub total_questions: usize,
    /// Rounded percentage, 0 to 100.
    pub accuracy: u32,
    pub date: DateTime<Utc>,
    pub category_scores: Vec<CategoryScore>,
}

/// Serde adapter that keeps the `-1` "no selection" marker on the wire.
mod selection {
    use serde::{Deserialize, Deserializer, Serializer};

    const NO_SELECTION: i64 = -1;

    pub fn serialize<S: Serializer>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(index) => serializer.serialize_u64(*index as u64),
            None => serializer.serialize_i64(NO_SELECTION),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw == NO_SELECTION {
            Ok(None)
        } else {
            usize::try_from(raw)
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid selection {}", raw)))
        }
    }
}
