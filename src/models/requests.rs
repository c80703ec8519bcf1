use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::MatchingError;
use crate::models::UserId;

/// Request to record a swipe
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "swiper_id", rename = "swiperId", default)]
    pub swiper_id: Option<UserId>,
    #[validate(range(min = 1))]
    #[serde(alias = "target_id", rename = "targetId", default)]
    pub target_id: Option<UserId>,
    #[validate(required)]
    #[serde(default)]
    pub liked: Option<bool>,
}

impl SwipeRequest {
    /// Split into (swiper, target, liked), rejecting absent identifiers
    pub fn into_parts(self) -> Result<(UserId, UserId, bool), MatchingError> {
        let swiper_id = self
            .swiper_id
            .ok_or_else(|| MatchingError::InvalidOperation("Swiper ID cannot be null".to_string()))?;
        let target_id = self
            .target_id
            .ok_or_else(|| MatchingError::InvalidOperation("Target ID cannot be null".to_string()))?;
        let liked = self
            .liked
            .ok_or_else(|| MatchingError::InvalidOperation("Liked status is required".to_string()))?;

        Ok((swiper_id, target_id, liked))
    }
}

/// Request to run mutual-match detection for a pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckMatchRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "user_a_id", rename = "userAId")]
    pub user_a_id: UserId,
    #[validate(range(min = 1))]
    #[serde(alias = "user_b_id", rename = "userBId")]
    pub user_b_id: UserId,
}

/// Query parameters for batched candidate lookup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidateBatchQuery {
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}
