//! Process-wide PostgreSQL pool
//!
//! The pool is created on first use and reused for the life of the process.
//! A failed initialization is not cached: the slot stays empty and the next
//! caller tries again. [`shutdown`] closes and clears it.

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::Mutex;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

static SHARED_POOL: LazyLock<Mutex<Option<PgPool>>> = LazyLock::new(|| Mutex::new(None));

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Bounds both connecting and checking a connection out of the pool
    pub acquire_timeout: Duration,
    /// Run once, right after the first successful connect
    pub migrator: Option<&'static Migrator>,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            migrator: None,
        }
    }

    pub fn with_migrator(mut self, migrator: &'static Migrator) -> Self {
        self.migrator = Some(migrator);
        self
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("migrations", &self.migrator.is_some())
            .finish()
    }
}

/// Get the shared pool, connecting (and migrating) on first use
///
/// The slot lock is held only to read or publish the pool, never across
/// connecting, so concurrent callers during an outage each fail after their
/// own `acquire_timeout` instead of queueing behind one another.
pub async fn shared_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    if let Some(pool) = current().await {
        return Ok(pool);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Database connection failed"))?;

    if let Some(migrator) = config.migrator {
        if let Err(e) = migrator.run(&pool).await {
            tracing::error!(error = %e, "Database migration failed");
            pool.close().await;
            return Err(sqlx::Error::Migrate(Box::new(e)));
        }
    }

    let mut slot = SHARED_POOL.lock().await;
    if let Some(existing) = slot.as_ref().filter(|p| !p.is_closed()) {
        // another caller published first; keep theirs
        let existing = existing.clone();
        drop(slot);
        pool.close().await;
        return Ok(existing);
    }

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );
    *slot = Some(pool.clone());
    Ok(pool)
}

async fn current() -> Option<PgPool> {
    SHARED_POOL
        .lock()
        .await
        .as_ref()
        .filter(|p| !p.is_closed())
        .cloned()
}

/// Close the shared pool if one exists; the next [`shared_pool`] call reconnects
pub async fn shutdown() {
    let pool = SHARED_POOL.lock().await.take();
    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }
}

pub async fn is_initialized() -> bool {
    current().await.is_some()
}
