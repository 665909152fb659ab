//! SQLite connection pool and schema bootstrap.

use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use slotwise_domain::Result;
use tracing::debug;

use crate::errors::InfraError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS schedule_configurations (
        professional_id TEXT PRIMARY KEY,
        weekday_schedule TEXT NOT NULL,
        last_updated_at INTEGER NOT NULL,
        updated_by TEXT
    );

    CREATE TABLE IF NOT EXISTS schedule_exceptions (
        professional_id TEXT NOT NULL,
        date TEXT NOT NULL,
        kind TEXT NOT NULL,
        time_blocks TEXT NOT NULL DEFAULT '[]',
        reason TEXT,
        PRIMARY KEY (professional_id, date)
    );

    CREATE TABLE IF NOT EXISTS appointments (
        id TEXT PRIMARY KEY,
        professional_id TEXT NOT NULL,
        start_ts INTEGER NOT NULL,
        end_ts INTEGER NOT NULL,
        status TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_appointments_professional_time
        ON appointments (professional_id, start_ts);
";

/// Owns the connection pool and guarantees the schema exists before any
/// repository touches it.
pub struct DatabaseManager {
    pool: Pool<SqliteConnectionManager>,
}

impl DatabaseManager {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn new(path: &Path) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.busy_timeout(BUSY_TIMEOUT)?;
            Ok(())
        });

        let pool = Pool::builder().max_size(8).build(manager).map_err(InfraError::from)?;

        let conn = pool.get().map_err(InfraError::from)?;
        Self::apply_schema(&conn)?;
        debug!(path = %path.display(), "database ready");

        Ok(Self { pool })
    }

    /// A clone of the pool for repository construction.
    pub fn pool(&self) -> Pool<SqliteConnectionManager> {
        self.pool.clone()
    }

    fn apply_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA).map_err(InfraError::from)?;
        Ok(())
    }
}
