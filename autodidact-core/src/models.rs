use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

pub const DEFAULT_PROJECT: &str = "default";
pub const DEFAULT_OFFSETS: [u32; 5] = [1, 3, 7, 14, 30];
pub const PROJECT_KEY_MAX: usize = 64;
/// Upper bound, in days, for schedule offsets and look-ahead windows.
pub const MAX_OFFSET_DAYS: u32 = 36_500;

/// A question/answer pair. Missing fields read back as empty strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flashcard {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// One scheduled review of one card. Rows carry the card text, not a card id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueEntry {
    pub question: String,
    pub answer: String,
    pub due_date: NaiveDate,
}

impl QueueEntry {
    pub fn for_card(card: &Flashcard, due_date: NaiveDate) -> Self {
        Self {
            question: card.question.clone(),
            answer: card.answer.clone(),
            due_date,
        }
    }
}

/// Day offsets after the start date at which every card comes due.
///
/// Always non-empty and strictly increasing, so each card gets one entry
/// per offset and no two entries of a card share a date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Schedule {
    offsets: Vec<u32>,
}

impl Schedule {
    pub fn new(offsets: Vec<u32>) -> Result<Self, CoreError> {
        if offsets.is_empty() {
            return Err(CoreError::Invalid("schedule must not be empty"));
        }
        if offsets[0] == 0 {
            return Err(CoreError::Invalid("schedule offsets must be positive"));
        }
        if !offsets.windows(2).all(|w| w[0] < w[1]) {
            return Err(CoreError::Invalid("schedule offsets must be strictly increasing"));
        }
        if offsets.iter().any(|&d| d > MAX_OFFSET_DAYS) {
            return Err(CoreError::Invalid("schedule offset too large"));
        }
        Ok(Self { offsets })
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            offsets: DEFAULT_OFFSETS.to_vec(),
        }
    }
}

impl TryFrom<Vec<u32>> for Schedule {
    type Error = CoreError;

    fn try_from(offsets: Vec<u32>) -> Result<Self, Self::Error> {
        Schedule::new(offsets)
    }
}

impl From<Schedule> for Vec<u32> {
    fn from(s: Schedule) -> Self {
        s.offsets
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewRecord {
    pub timestamp: DateTime<Utc>,
    pub question: String,
    pub correct: bool,
}

impl ReviewRecord {
    pub fn new(question: impl Into<String>, correct: bool, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            question: question.into(),
            correct,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FocusSession {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Whole minutes between `start` and `end`.
    pub session_length: u32,
    pub session_type: String,
    pub project_id: String,
}

impl FocusSession {
    pub fn completed(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        session_type: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        let minutes = (end - start).num_minutes().max(0);
        Self {
            start,
            end,
            session_length: u32::try_from(minutes).unwrap_or(u32::MAX),
            session_type: session_type.into(),
            project_id: project_id.into(),
        }
    }
}

/// Project keys name directories on disk, so only `[A-Za-z0-9_-]` is allowed.
pub fn validate_project(key: &str) -> Result<(), CoreError> {
    if key.is_empty() || key.len() > PROJECT_KEY_MAX {
        return Err(CoreError::Invalid("project key length"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Invalid("project key characters"));
    }
    Ok(())
}
