//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;

use sqlx::PgPool;

use shopping_list_api::config::{self, ConfigError};
use shopping_list_api::db;

/// Connect to the database named by the environment.
async fn connect() -> Result<PgPool, ConnectError> {
    let database_url = config::database_url_from_env()?;
    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
