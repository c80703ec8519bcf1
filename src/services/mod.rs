// Service exports
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod store;

pub use cache::CachedUserDirectory;
pub use memory::{MemoryMatchStore, MemorySwipeStore, MemoryUserDirectory};
pub use postgres::{PoolOptions, PostgresClient};
pub use store::{MatchStore, StoreError, SwipeStore, UserDirectory};
