use async_trait::async_trait;
use thiserror::Error;

use crate::core::MatchingError;
use crate::models::{Match, Swipe, User, UserId};

/// Errors raised by the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique").to_string();
                return StoreError::ConstraintViolation(constraint);
            }
        }
        StoreError::Database(err)
    }
}

/// Read-only view of the external user directory
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn exists(&self, user_id: UserId) -> Result<bool, StoreError>;

    async fn get(&self, user_id: UserId) -> Result<Option<User>, StoreError>;

    /// Fetch a user or fail with `UserNotFound` naming the id
    async fn resolve_or_fail(&self, user_id: UserId) -> Result<User, MatchingError> {
        self.get(user_id)
            .await?
            .ok_or(MatchingError::UserNotFound(user_id))
    }
}

/// Durable record of swipe decisions
///
/// Implementations must reject a second record for the same ordered
/// (swiper, target) pair with `StoreError::ConstraintViolation`, even
/// when the two writes race.
#[async_trait]
pub trait SwipeStore: Send + Sync {
    async fn exists(&self, swiper_id: UserId, target_id: UserId) -> Result<bool, StoreError>;

    async fn record(
        &self,
        swiper_id: UserId,
        target_id: UserId,
        liked: bool,
    ) -> Result<Swipe, StoreError>;

    /// The swipe from `swiper_id` to `target_id`, only if it was a like
    async fn find_liked(
        &self,
        swiper_id: UserId,
        target_id: UserId,
    ) -> Result<Option<Swipe>, StoreError>;

    /// Users other than `user_id` that `user_id` has not swiped on, by ascending id
    async fn find_candidates(&self, user_id: UserId, limit: usize)
        -> Result<Vec<User>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Durable record of mutual matches
///
/// Implementations must reject a second match for the same unordered
/// pair with `StoreError::ConstraintViolation`, whichever slot each
/// user was stored in.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn are_matched(&self, user1_id: UserId, user2_id: UserId) -> Result<bool, StoreError>;

    async fn create(&self, user1_id: UserId, user2_id: UserId) -> Result<Match, StoreError>;

    /// Matches involving `user_id`, most recent first
    async fn find_for_user(&self, user_id: UserId) -> Result<Vec<Match>, StoreError>;
}
