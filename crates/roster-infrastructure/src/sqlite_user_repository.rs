//! SQLite UserRepository implementation.
//!
//! Each repository operation maps 1:1 to a single SQL statement against the
//! `users` table. Uniqueness and not-found conditions are reported as
//! structured errors, translated from the driver's unique-constraint
//! violation and zero-row results. Concurrency control is delegated to
//! SQLite; no explicit transaction spans multiple statements.

use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use roster_core::error::{Result, RosterError};
use roster_core::user::{UserRecord, UserRepository};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS users (
    username   TEXT PRIMARY KEY,
    email      TEXT,
    telephone  TEXT,
    first_name TEXT,
    last_name  TEXT,
    birth_date DATE,
    profession TEXT,
    image      TEXT NOT NULL DEFAULT ''
)";

const SELECT_COLUMNS: &str =
    "username, email, telephone, first_name, last_name, birth_date, profession, image";

/// Full row from the `users` table.
///
/// Kept separate from the domain model so the driver derive stays out of
/// `roster-core`.
#[derive(Debug, Clone, FromRow)]
struct UserRow {
    username: String,
    email: Option<String>,
    telephone: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    birth_date: Option<NaiveDate>,
    profession: Option<String>,
    image: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            username: row.username,
            email: row.email,
            telephone: row.telephone,
            first_name: row.first_name,
            last_name: row.last_name,
            birth_date: row.birth_date,
            profession: row.profession,
            image: row.image,
        }
    }
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Connects to the database at `url` (e.g. `sqlite://roster.db`),
    /// creating the file and the `users` table if they do not exist.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RosterError::config(format!("invalid database url '{url}': {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| RosterError::data_access(format!("failed to connect to '{url}': {e}")))?;

        Self::with_pool(pool).await
    }

    /// Opens an in-memory database (for testing).
    ///
    /// The pool is capped at one connection; each connection to
    /// `sqlite::memory:` would otherwise see its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RosterError::data_access(format!("failed to open in-memory db: {e}")))?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| RosterError::data_access(format!("failed to create users table: {e}")))?;
        Ok(Self { pool })
    }
}

/// Translates a driver error, mapping unique-constraint violations on the
/// username key to `DuplicateUsername`.
fn map_write_error(err: sqlx::Error, username: &str) -> RosterError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => RosterError::duplicate(username),
        _ => RosterError::data_access(err.to_string()),
    }
}

#[async_trait::async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM users WHERE username = ?"))
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RosterError::data_access(e.to_string()))?;

        Ok(row.map(UserRecord::from))
    }

    async fn create(&self, record: &UserRecord) -> Result<UserRecord> {
        sqlx::query(
            "INSERT INTO users (username, email, telephone, first_name, last_name, birth_date, profession, image)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.telephone)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.birth_date)
        .bind(&record.profession)
        .bind(&record.image)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &record.username))?;

        Ok(record.clone())
    }

    async fn update(&self, old_username: &str, record: &UserRecord) -> Result<UserRecord> {
        let result = sqlx::query(
            "UPDATE users
             SET username = ?, email = ?, telephone = ?, first_name = ?, last_name = ?,
                 birth_date = ?, profession = ?, image = ?
             WHERE username = ?",
        )
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.telephone)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.birth_date)
        .bind(&record.profession)
        .bind(&record.image)
        .bind(old_username)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &record.username))?;

        if result.rows_affected() == 0 {
            return Err(RosterError::not_found(old_username));
        }

        Ok(record.clone())
    }

    async fn delete(&self, username: &str) -> Result<UserRecord> {
        let Some(record) = self.find_by_username(username).await? else {
            return Err(RosterError::not_found(username));
        };

        sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| RosterError::data_access(e.to_string()))?;

        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>> {
        // Order is store-defined for this backing
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM users"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RosterError::data_access(e.to_string()))?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }
}
