use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a user by the user directory
pub type UserId = i64;

/// User as seen by the matching core
///
/// Users are owned by the external directory; the core only reads
/// their identity and public profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, bio: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bio,
        }
    }
}

/// One-directional like/dislike decision
///
/// At most one swipe exists per ordered (swiper, target) pair and it is
/// never updated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swipe {
    pub id: i64,
    #[serde(rename = "swiperId")]
    pub swiper_id: UserId,
    #[serde(rename = "targetId")]
    pub target_id: UserId,
    pub liked: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Confirmed mutual match between an unordered pair of users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    #[serde(rename = "user1Id")]
    pub user1_id: UserId,
    #[serde(rename = "user2Id")]
    pub user2_id: UserId,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Whether the match involves the given user in either slot
    pub fn involves(&self, user_id: UserId) -> bool {
        self.user1_id == user_id || self.user2_id == user_id
    }

    /// Whether the match covers the unordered pair {a, b}
    pub fn is_pair(&self, a: UserId, b: UserId) -> bool {
        (self.user1_id == a && self.user2_id == b) || (self.user1_id == b && self.user2_id == a)
    }

    /// The counterpart of `viewer` in this match
    pub fn other_user(&self, viewer: UserId) -> UserId {
        if self.user1_id == viewer {
            self.user2_id
        } else {
            self.user1_id
        }
    }
}

/// A match presented relative to the user viewing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    #[serde(rename = "matchId")]
    pub match_id: i64,
    #[serde(rename = "matchedUser")]
    pub matched_user: User,
    #[serde(rename = "matchedAt")]
    pub matched_at: DateTime<Utc>,
}

/// Result of recording a swipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeOutcome {
    pub success: bool,
    #[serde(rename = "isMatch")]
    pub match_created: bool,
    #[serde(rename = "nextPotentialMatch")]
    pub next_candidate: Option<User>,
    pub message: String,
}

impl SwipeOutcome {
    pub const RECORDED: &'static str = "Swipe recorded successfully";
    pub const RECORDED_NO_MORE: &'static str =
        "Swipe recorded successfully. No more potential matches available";

    pub fn recorded(match_created: bool, next_candidate: Option<User>) -> Self {
        let message = if next_candidate.is_some() {
            Self::RECORDED
        } else {
            Self::RECORDED_NO_MORE
        };

        Self {
            success: true,
            match_created,
            next_candidate,
            message: message.to_string(),
        }
    }
}
