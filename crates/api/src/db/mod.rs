//! Document store for shopping lists.
//!
//! # Database: `shopping`
//!
//! Each list is stored as one document. Its members and items are embedded
//! arrays, so deleting a list removes everything it owns.
//!
//! ## Tables
//!
//! - `shopping.list` - One row per list; `members` and `items` are JSONB arrays
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p shopping-list-cli -- migrate run
//! ```
//!
//! # Backends
//!
//! Handlers only see [`ListStore`]. [`PgListStore`] is used in production,
//! [`InMemoryListStore`] in tests.

mod memory;
mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use shopping_list_core::ListId;

use crate::models::{Item, NewShoppingList, ShoppingList};

pub use memory::InMemoryListStore;
pub use postgres::PgListStore;

/// Embedded schema migrations, applied by `sl-cli migrate`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document does not match the expected shape.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A value could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Operations the service needs from its document store.
///
/// Methods that target a single list return `None` (or `false`) when no list
/// has the given id; that is not an error at this layer.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Insert a new list, assigning its id and creation time.
    async fn insert(&self, list: NewShoppingList) -> Result<ShoppingList, StoreError>;

    /// Load a list by id.
    async fn find_by_id(&self, id: ListId) -> Result<Option<ShoppingList>, StoreError>;

    /// Lists owned by or shared with `user_id`, newest first.
    ///
    /// Archived lists are skipped unless `include_archived` is set.
    async fn find_for_user(
        &self,
        user_id: &str,
        include_archived: bool,
    ) -> Result<Vec<ShoppingList>, StoreError>;

    /// Set the archived flag and return the updated list.
    async fn set_archived(
        &self,
        id: ListId,
        archived: bool,
    ) -> Result<Option<ShoppingList>, StoreError>;

    /// Delete a list and everything embedded in it.
    async fn delete(&self, id: ListId) -> Result<bool, StoreError>;

    /// Replace the stored document with `list`.
    ///
    /// Last write wins: concurrent changes made since `list` was loaded are lost.
    async fn save(&self, list: &ShoppingList) -> Result<bool, StoreError>;

    /// Add `user_id` to the members unless already present.
    async fn add_member(
        &self,
        id: ListId,
        user_id: &str,
    ) -> Result<Option<ShoppingList>, StoreError>;

    /// Remove `user_id` from the members if present.
    async fn remove_member(
        &self,
        id: ListId,
        user_id: &str,
    ) -> Result<Option<ShoppingList>, StoreError>;

    /// Append an item to the list.
    async fn push_item(&self, id: ListId, item: &Item) -> Result<bool, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
