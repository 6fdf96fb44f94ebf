//! User repository trait.
//!
//! Defines the interface for user record persistence operations.

use super::model::UserRecord;
use crate::error::Result;

/// An abstract store for user records, keyed exclusively by username.
///
/// This trait defines the contract for persisting and retrieving user
/// records, decoupling the directory's orchestration logic from the specific
/// storage mechanism (flat JSON document or relational table).
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Username uniqueness (`create` and renaming `update` calls must fail with
///   `RosterError::DuplicateUsername` on collision)
/// - Concurrent mutations, to at least a single-writer level of safety
///
/// Implementations do not verify that a record's `image` file exists.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Looks up a record by exact username match.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UserRecord))`: Record found
    /// - `Ok(None)`: No record with that username
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Creates a new record.
    ///
    /// # Returns
    ///
    /// - `Ok(UserRecord)`: The stored record
    /// - `Err(RosterError::DuplicateUsername)`: The username already exists
    /// - `Err(_)`: Storage failure
    async fn create(&self, record: &UserRecord) -> Result<UserRecord>;

    /// Replaces all mutable fields of the record currently keyed by
    /// `old_username`. If `record.username` differs, the record's key changes
    /// (rename).
    ///
    /// # Returns
    ///
    /// - `Ok(UserRecord)`: The updated record
    /// - `Err(RosterError::NotFound)`: No record keyed by `old_username`
    /// - `Err(RosterError::DuplicateUsername)`: A rename collided with an
    ///   existing record
    /// - `Err(_)`: Storage failure
    async fn update(&self, old_username: &str, record: &UserRecord) -> Result<UserRecord>;

    /// Removes the record keyed by `username`.
    ///
    /// # Returns
    ///
    /// - `Ok(UserRecord)`: The removed record
    /// - `Err(RosterError::NotFound)`: No record with that username
    /// - `Err(_)`: Storage failure
    async fn delete(&self, username: &str) -> Result<UserRecord>;

    /// Returns every stored record.
    ///
    /// Order is store-defined for the relational backing; the JSON backing
    /// returns records in document (insertion) order.
    async fn list_all(&self) -> Result<Vec<UserRecord>>;
}
