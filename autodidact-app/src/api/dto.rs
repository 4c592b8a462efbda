use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Default)]
pub struct BuildQueueIn {
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub rebuild: bool,
}

#[derive(Debug, Serialize)]
pub struct QueueBuiltOut {
    pub project: String,
    pub entries: usize,
    pub rebuilt: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateIn {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewIn {
    pub question: String,
    pub correct: bool,
}

#[derive(Debug, Deserialize)]
pub struct FocusIn {
    pub minutes: u32,
    pub session_type: Option<String>,
    pub project: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FocusStartedOut {
    pub minutes: u32,
    pub session_type: String,
    pub project: String,
    pub ends_at: DateTime<Utc>,
}
