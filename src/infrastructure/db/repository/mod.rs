use sqlx::SqlitePool;

mod entities;
mod prompts;
mod sessions;
mod tags;

/// Data access for the vault collections. One instance per process,
/// shared behind an `Arc`; the pool handles connection reuse.
pub struct VaultRepository {
    pool: SqlitePool,
}

impl VaultRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// SQLite reports unique-index violations as database errors; the
/// services surface them as conflicts, not server failures.
pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.message().contains("UNIQUE constraint failed"),
        _ => false,
    }
}
