// models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Poll {
    pub id: Uuid,
    pub owner_id: String,
    pub question: String,
    pub options: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vote {
    pub id: Uuid,
    pub poll_id: Uuid,
    /// `None` for anonymous votes; only present voters are deduplicated.
    pub voter_id: Option<String>,
    pub option_index: i32,
    pub created_at: DateTime<Utc>,
}

/// Per-option vote count, zero-filled for options nobody picked.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OptionTally {
    pub option_index: i32,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct PollInput {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub option_index: i32,
}

/// A poll as returned to a caller. `can_edit` is computed per request
/// and never persisted.
#[derive(Debug, Serialize)]
pub struct PollView {
    #[serde(flatten)]
    pub poll: Poll,
    pub can_edit: bool,
}
