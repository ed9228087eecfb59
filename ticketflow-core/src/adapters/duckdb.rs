//! DuckDB slot storage implementation

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::Utc;
use duckdb::{params, Connection};

use crate::domain::result::{Error, Result as CoreResult};
use crate::ports::KeyValueStorage;
use crate::services::{MigrationResult, MigrationService};

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400, 800ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

/// Durable key-value storage in a single `sys_slots` table
pub struct DuckDbStorage {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl DuckDbStorage {
    /// Open (or create) the storage database
    ///
    /// Includes retry logic with exponential backoff for file locking errors,
    /// which can occur when two `tf` processes start at the same time.
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    return Ok(Self {
                        conn: Mutex::new(conn),
                        db_path: db_path.to_path_buf(),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        eprintln!(
                            "[ticketflow] Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow!("Failed to open database after {} retries", MAX_RETRIES)))
    }

    /// In-memory database, used by tests that want real SQL without a file
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: PathBuf::from(":memory:"),
        })
    }

    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Disable extension autoloading; nothing here needs it and cached
        // extensions can fail code signing on macOS
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_with_flags(db_path, config)?;
        Ok(conn)
    }

    fn lock(&self) -> CoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))
    }

    /// Run database migrations using the MigrationService
    pub fn run_migrations(&self) -> Result<MigrationResult> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let migration_service = MigrationService::new(&conn);
        migration_service.run_pending()
    }

    /// Ensure database schema exists (runs pending migrations)
    pub fn ensure_schema(&self) -> Result<()> {
        self.run_migrations()?;
        Ok(())
    }

    /// Get the path to the storage database
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl KeyValueStorage for DuckDbStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT slot_value FROM sys_slots WHERE slot_key = ?")
            .map_err(|e| Error::storage(e.to_string()))?;
        let first = stmt
            .query_map([key], |row| row.get::<_, String>(0))
            .map_err(|e| Error::storage(e.to_string()))?
            .next();

        let value = match first {
            Some(value) => Some(value.map_err(|e| Error::storage(e.to_string()))?),
            None => None,
        };
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO sys_slots (slot_key, slot_value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT (slot_key) DO UPDATE SET
                slot_value = EXCLUDED.slot_value,
                updated_at = EXCLUDED.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| Error::storage(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM sys_slots WHERE slot_key = ?", [key])
            .map_err(|e| Error::storage(e.to_string()))?;
        Ok(())
    }

    fn keys(&self) -> CoreResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT slot_key FROM sys_slots ORDER BY slot_key")
            .map_err(|e| Error::storage(e.to_string()))?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| Error::storage(e.to_string()))?
            .collect::<Result<Vec<String>, duckdb::Error>>()
            .map_err(|e| Error::storage(e.to_string()))?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn storage() -> DuckDbStorage {
        let storage = DuckDbStorage::open_in_memory().unwrap();
        storage.ensure_schema().unwrap();
        storage
    }

    #[test]
    fn test_get_missing_slot() {
        let storage = storage();
        assert_eq!(storage.get("tickets").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites_slot() {
        let storage = storage();
        storage.set("tickets", "[]").unwrap();
        storage.set("tickets", r#"[{"id":"1"}]"#).unwrap();

        assert_eq!(
            storage.get("tickets").unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
        assert_eq!(storage.keys().unwrap(), vec!["tickets".to_string()]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let storage = storage();
        storage.set("ticketapp_session", "{}").unwrap();
        storage.remove("ticketapp_session").unwrap();
        storage.remove("ticketapp_session").unwrap();
        assert_eq!(storage.get("ticketapp_session").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("ticketflow.duckdb");

        {
            let storage = DuckDbStorage::new(&db_path).unwrap();
            storage.ensure_schema().unwrap();
            storage.set("ticketapp_users", "[]").unwrap();
        }

        let storage = DuckDbStorage::new(&db_path).unwrap();
        storage.ensure_schema().unwrap();
        assert_eq!(storage.get("ticketapp_users").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.db_path(), db_path.as_path());
    }

    #[test]
    fn test_keys_reports_unreadable_rows() {
        let storage = storage();
        storage
            .conn
            .lock()
            .unwrap()
            .execute_batch(
                "DROP TABLE sys_slots;
                 CREATE TABLE sys_slots (slot_key VARCHAR, slot_value VARCHAR);
                 INSERT INTO sys_slots VALUES ('tickets', '[]'), (NULL, '[]');",
            )
            .unwrap();

        let err = storage.keys().unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_retryable_error_detection() {
        assert!(is_retryable_error("IO Error: Database is locked"));
        assert!(is_retryable_error("The process cannot access the file"));
        assert!(!is_retryable_error("Catalog Error: table does not exist"));
    }
}
