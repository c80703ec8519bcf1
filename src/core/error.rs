use thiserror::Error;

use crate::models::UserId;
use crate::services::StoreError;

/// Errors returned by the matching engine
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("User not found with ID: {0}")]
    UserNotFound(UserId),

    /// Rejected before any persistence
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The ordered pair already has a swipe; callers treat this as "already acted"
    #[error("User {swiper_id} has already swiped on user {target_id}")]
    DuplicateSwipe { swiper_id: UserId, target_id: UserId },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl MatchingError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            MatchingError::UserNotFound(_) => "USER_NOT_FOUND",
            MatchingError::InvalidOperation(_) => "INVALID_OPERATION",
            MatchingError::DuplicateSwipe { .. } => "DUPLICATE_SWIPE",
            MatchingError::Storage(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_identify_users() {
        assert_eq!(
            MatchingError::UserNotFound(7).to_string(),
            "User not found with ID: 7"
        );
        assert_eq!(
            MatchingError::DuplicateSwipe {
                swiper_id: 1,
                target_id: 2
            }
            .to_string(),
            "User 1 has already swiped on user 2"
        );
    }
}
