use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{Match, User};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
            timestamp: Utc::now(),
        }
    }
}

/// Batch of candidates for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub candidates: Vec<User>,
    pub count: usize,
}

/// Whether a swipe exists for an ordered pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipedResponse {
    pub swiped: bool,
}

/// Whether an unordered pair is matched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedResponse {
    pub matched: bool,
}

/// Result of an explicit mutual-match check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCheckResponse {
    #[serde(rename = "matchCreated")]
    pub match_created: bool,
    #[serde(rename = "match")]
    pub created: Option<Match>,
}
