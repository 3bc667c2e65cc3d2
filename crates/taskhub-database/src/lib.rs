//! # taskhub-database
//!
//! Subject record store for TaskHub: the [`UserStore`] collaborator
//! trait, a PostgreSQL implementation, and an in-memory implementation
//! for development and tests.

pub mod connection;
pub mod migration;
pub mod repositories;

use std::sync::Arc;

use tracing::info;

use taskhub_core::config::DatabaseConfig;
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;

pub use connection::DatabasePool;
pub use repositories::memory::MemoryUserRepository;
pub use repositories::user::{PgUserRepository, UserStore};

/// Build the record store selected by configuration.
///
/// The PostgreSQL backend runs pending migrations before returning.
pub async fn connect_user_store(config: &DatabaseConfig) -> AppResult<Arc<dyn UserStore>> {
    match config.provider.as_str() {
        "postgres" => {
            let pool = DatabasePool::connect(config).await?;
            migration::run_migrations(pool.pool()).await?;
            Ok(Arc::new(PgUserRepository::new(pool.into_pool())))
        }
        "memory" => {
            info!("Using in-memory user store");
            Ok(Arc::new(MemoryUserRepository::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown database provider: '{other}'. Supported: postgres, memory"
        ))),
    }
}
