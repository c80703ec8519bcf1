use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::models::{Match, Swipe, User, UserId};
use crate::services::store::{MatchStore, StoreError, SwipeStore, UserDirectory};

/// Connection pool tuning for [`PostgresClient`]
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

/// PostgreSQL-backed swipe, match and user storage
///
/// Uniqueness of swipes and matches is enforced by the schema
/// (`uk_swipe_swiper_target` and `uk_match_user_pair`), so concurrent
/// writers across processes are arbitrated by the database.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Connect and run pending migrations
    pub async fn new(database_url: &str, options: PoolOptions) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .min_connections(options.min_connections)
            .acquire_timeout(options.acquire_timeout)
            .idle_timeout(options.idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        let defaults = PoolOptions::default();
        let options = PoolOptions {
            max_connections: max_connections.unwrap_or(defaults.max_connections),
            min_connections: min_connections.unwrap_or(defaults.min_connections),
            acquire_timeout: acquire_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.acquire_timeout),
            idle_timeout: idle_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.idle_timeout),
        };

        tracing::info!(
            max_connections = options.max_connections,
            "Connecting to PostgreSQL"
        );

        Self::new(url, options).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        bio: row.get("bio"),
    }
}

fn swipe_from_row(row: &PgRow) -> Swipe {
    Swipe {
        id: row.get("id"),
        swiper_id: row.get("swiper_id"),
        target_id: row.get("target_id"),
        liked: row.get("liked"),
        created_at: row.get("created_at"),
    }
}

fn match_from_row(row: &PgRow) -> Match {
    Match {
        id: row.get("id"),
        user1_id: row.get("user1_id"),
        user2_id: row.get("user2_id"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl UserDirectory for PostgresClient {
    async fn exists(&self, user_id: UserId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1) AS found")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("found"))
    }

    async fn get(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query("SELECT id, name, bio FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }
}

#[async_trait]
impl SwipeStore for PostgresClient {
    async fn exists(&self, swiper_id: UserId, target_id: UserId) -> Result<bool, StoreError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM swipes
                WHERE swiper_id = $1 AND target_id = $2
            ) AS found
        "#;

        let row = sqlx::query(query)
            .bind(swiper_id)
            .bind(target_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("found"))
    }

    /// Insert a swipe
    ///
    /// A plain INSERT: a concurrent duplicate surfaces as a unique
    /// violation, mapped to `StoreError::ConstraintViolation`.
    async fn record(
        &self,
        swiper_id: UserId,
        target_id: UserId,
        liked: bool,
    ) -> Result<Swipe, StoreError> {
        let query = r#"
            INSERT INTO swipes (swiper_id, target_id, liked)
            VALUES ($1, $2, $3)
            RETURNING id, swiper_id, target_id, liked, created_at
        "#;

        let row = sqlx::query(query)
            .bind(swiper_id)
            .bind(target_id)
            .bind(liked)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(swiper_id, target_id, liked, "Recorded swipe");

        Ok(swipe_from_row(&row))
    }

    async fn find_liked(
        &self,
        swiper_id: UserId,
        target_id: UserId,
    ) -> Result<Option<Swipe>, StoreError> {
        let query = r#"
            SELECT id, swiper_id, target_id, liked, created_at
            FROM swipes
            WHERE swiper_id = $1 AND target_id = $2 AND liked = TRUE
        "#;

        let row = sqlx::query(query)
            .bind(swiper_id)
            .bind(target_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(swipe_from_row))
    }

    async fn find_candidates(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<User>, StoreError> {
        let query = r#"
            SELECT u.id, u.name, u.bio
            FROM users u
            WHERE u.id <> $1
              AND NOT EXISTS (
                  SELECT 1 FROM swipes s
                  WHERE s.swiper_id = $1 AND s.target_id = u.id
              )
            ORDER BY u.id ASC
            LIMIT $2
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl MatchStore for PostgresClient {
    async fn are_matched(&self, user1_id: UserId, user2_id: UserId) -> Result<bool, StoreError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM matches
                WHERE (user1_id = $1 AND user2_id = $2)
                   OR (user1_id = $2 AND user2_id = $1)
            ) AS found
        "#;

        let row = sqlx::query(query)
            .bind(user1_id)
            .bind(user2_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("found"))
    }

    async fn create(&self, user1_id: UserId, user2_id: UserId) -> Result<Match, StoreError> {
        let query = r#"
            INSERT INTO matches (user1_id, user2_id)
            VALUES ($1, $2)
            RETURNING id, user1_id, user2_id, created_at
        "#;

        let row = sqlx::query(query)
            .bind(user1_id)
            .bind(user2_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(match_from_row(&row))
    }

    async fn find_for_user(&self, user_id: UserId) -> Result<Vec<Match>, StoreError> {
        let query = r#"
            SELECT id, user1_id, user2_id, created_at
            FROM matches
            WHERE user1_id = $1 OR user2_id = $1
            ORDER BY created_at DESC, id DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("User {} has {} matches", user_id, rows.len());

        Ok(rows.iter().map(match_from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_options() {
        let options = PoolOptions::default();
        assert_eq!(options.max_connections, 10);
        assert_eq!(options.min_connections, 1);
        assert_eq!(options.acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_non_database_errors_stay_unclassified() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
