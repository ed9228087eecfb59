//! Database migrations - embedded SQL files
//!
//! Two databases, two migration sets: the slot storage
//! (`ticketflow.duckdb`) and the event log (`logs.duckdb`). Both are applied
//! by [`crate::services::MigrationService`] and tracked in their own
//! `sys_migrations` table.
//!
//! When adding a migration, create `NNN_description.sql` in the matching
//! directory and append it to the list below, in order.

/// Slot storage migrations. Format: (filename, sql_content)
pub const STORAGE_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("storage/000_migrations.sql")),
    ("001_slot_storage.sql", include_str!("storage/001_slot_storage.sql")),
];

/// Event log migrations. Format: (filename, sql_content)
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("events/000_migrations.sql")),
    ("001_event_log.sql", include_str!("events/001_event_log.sql")),
];

/// Name of the bootstrap migration that creates `sys_migrations`
pub const BOOTSTRAP_MIGRATION: &str = "000_migrations.sql";
