use anyhow::{Context, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Duration;

use super::schema::{DROP_ALL, SCHEMA, SEED_DATA, TABLES};

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

/// Pool size for file-backed databases when none is configured
pub const DEFAULT_POOL_SIZE: u32 = 4;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling support
///
/// Every operation checks a connection out of the pool and hands it back when
/// the guard drops, so no connection outlives the call that needed it.
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Open (or create) the database at `path` with the default pool size
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_pool_size(path, DEFAULT_POOL_SIZE)
    }

    /// Open the database at `path` with at most `pool_size` connections.
    ///
    /// An in-memory database always gets a single connection: each SQLite
    /// memory connection is its own database.
    pub fn with_pool_size<P: AsRef<Path>>(path: P, pool_size: u32) -> Result<Self> {
        let (manager, in_memory) = Self::create_connection_manager(path);
        let max_size = if in_memory { 1 } else { pool_size.max(1) };

        let pool = Pool::builder()
            .max_size(max_size)
            .connection_timeout(Duration::from_secs(5))
            .build(manager)
            .context("Failed to create database connection pool")?;

        tracing::debug!(max_size, in_memory, "Database pool created");
        Ok(Self { pool })
    }

    /// Create appropriate connection manager based on path
    ///
    /// # Arguments
    /// * `path` - Database file path or ":memory:" for in-memory database
    ///
    /// # Returns
    /// * the manager, with foreign key enforcement enabled on every connection,
    ///   and whether it is backed by memory
    fn create_connection_manager<P: AsRef<Path>>(path: P) -> (SqliteConnectionManager, bool) {
        let path_str = path.as_ref().to_string_lossy();
        let trimmed_path = path_str.trim();

        let (manager, in_memory) = if trimmed_path.eq_ignore_ascii_case(MEMORY_DB_PATH) {
            (SqliteConnectionManager::memory(), true)
        } else {
            (SqliteConnectionManager::file(path), false)
        };

        let manager = manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        (manager, in_memory)
    }

    /// Create an in-memory database (useful for testing)
    pub fn in_memory() -> Result<Self> {
        Self::new(MEMORY_DB_PATH)
    }

    /// Create all tables if missing, then seed when the users table is empty
    pub fn ensure_schema(&self) -> Result<()> {
        {
            let conn = self.connection()?;
            conn.execute_batch(SCHEMA)
                .context("Failed to initialize database schema")?;
        }

        if self.seed_if_empty()? {
            tracing::info!("Seeded empty database");
        }
        Ok(())
    }

    /// Insert the seed rows unless users already exist.
    ///
    /// Returns `true` when rows were inserted.
    pub fn seed_if_empty(&self) -> Result<bool> {
        let mut conn = self.connection()?;
        let tx = conn.transaction().context("Failed to begin seed transaction")?;
        let seeded = seed_if_empty_on(&tx)?;
        tx.commit().context("Failed to commit seed data")?;
        Ok(seeded)
    }

    /// Drop every table, recreate the schema and reseed, all in one transaction
    pub fn reset(&self) -> Result<()> {
        let mut conn = self.connection()?;
        let tx = conn.transaction().context("Failed to begin reset transaction")?;

        tx.execute_batch(DROP_ALL).context("Failed to drop tables")?;
        tx.execute_batch(SCHEMA)
            .context("Failed to recreate database schema")?;
        seed_if_empty_on(&tx)?;

        tx.commit().context("Failed to commit database reset")?;
        tracing::info!("Database reset and reseeded");
        Ok(())
    }

    /// Row count of every table, in dependency order
    pub fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        let conn = self.connection()?;
        TABLES
            .iter()
            .map(|table| {
                let count: i64 = conn
                    .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                        row.get(0)
                    })
                    .with_context(|| format!("Failed to count rows in {}", table))?;
                Ok((*table, count))
            })
            .collect()
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .context("Failed to get database connection from pool")
    }
}

fn seed_if_empty_on(conn: &rusqlite::Connection) -> Result<bool> {
    let users: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .context("Failed to count users")?;
    if users > 0 {
        tracing::debug!(users, "Users present, skipping seed");
        return Ok(false);
    }

    conn.execute_batch(SEED_DATA)
        .context("Failed to seed database")?;
    Ok(true)
}
