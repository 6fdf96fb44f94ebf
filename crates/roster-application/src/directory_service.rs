//! Mutation orchestrator for the user directory.
//!
//! Sequences "resolve upload → merge into record → write to store → emit
//! outcome" for the create/edit/delete flows, and fronts the two read flows.
//! Every mutation is matched by its unique username before the store is
//! touched; outcome events go to an optional injected notifier whose failure
//! never changes the reported result.

use std::sync::Arc;

use chrono::NaiveDate;

use roster_core::error::{Result, RosterError};
use roster_core::notify::{DirectoryEvent, Notifier};
use roster_core::submission::FormSubmission;
use roster_core::user::{UserRecord, UserRepository};
use roster_infrastructure::UploadStore;

/// Form field names shared with the static HTML pages.
pub mod fields {
    /// Search and delete key
    pub const USERNAME: &str = "username";
    /// Visible username input on the create/edit forms
    pub const USER_NAME: &str = "user-name";
    /// Hidden field carrying the record's current username through an edit
    pub const EDIT_USERNAME: &str = "edit-username";
    pub const EMAIL: &str = "email";
    pub const TELEPHONE: &str = "telephone";
    pub const FIRST_NAME: &str = "first-name";
    pub const LAST_NAME: &str = "last-name";
    pub const BIRTH_DATE: &str = "birth-date";
    pub const PROFESSION: &str = "profession";
    /// Multipart file field
    pub const IMAGE: &str = "image";
}

/// Parses an HTML date input value; anything unparseable is dropped with a
/// warning (there is no validation surface to reject it through).
fn parse_birth_date(raw: Option<String>) -> Option<NaiveDate> {
    raw.and_then(|value| match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!(value = %value, %err, "ignoring unparseable birth date");
            None
        }
    })
}

/// Builds a full record from the submission's form fields plus the resolved
/// image filename.
fn record_from_submission(submission: &FormSubmission, image: String) -> Result<UserRecord> {
    let username = submission.require(fields::USER_NAME)?.to_string();
    Ok(UserRecord {
        username,
        email: submission.optional(fields::EMAIL),
        telephone: submission.optional(fields::TELEPHONE),
        first_name: submission.optional(fields::FIRST_NAME),
        last_name: submission.optional(fields::LAST_NAME),
        birth_date: parse_birth_date(submission.optional(fields::BIRTH_DATE)),
        profession: submission.optional(fields::PROFESSION),
        image,
    })
}

/// Sequencer for create/edit/delete request handling.
pub struct DirectoryService {
    repository: Arc<dyn UserRepository>,
    uploads: UploadStore,
    notifier: Option<Arc<dyn Notifier>>,
}

impl DirectoryService {
    pub fn new(repository: Arc<dyn UserRepository>, uploads: UploadStore) -> Self {
        Self {
            repository,
            uploads,
            notifier: None,
        }
    }

    /// Attaches an outcome notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Fire-and-forget event emission; a notifier failure is logged and
    /// swallowed so it cannot change the operation's outcome.
    async fn emit(&self, event: DirectoryEvent) {
        if let Some(notifier) = &self.notifier {
            if let Err(err) = notifier.notify(&event).await {
                tracing::warn!(%err, "notifier failed; operation outcome unaffected");
            }
        }
    }

    /// Stores the submission's file part, if any, and returns the stored
    /// filename. The file stays on disk even if the store write that follows
    /// fails.
    async fn resolve_upload(&self, submission: &FormSubmission) -> Result<Option<String>> {
        match submission.file() {
            Some(part) => Ok(Some(self.uploads.store(part).await?)),
            None => Ok(None),
        }
    }

    /// Creates a record from form fields plus an optional upload.
    pub async fn create_user(&self, submission: &FormSubmission) -> Result<UserRecord> {
        let image = self.resolve_upload(submission).await?.unwrap_or_default();
        let record = record_from_submission(submission, image)?;

        let created = self.repository.create(&record).await?;
        tracing::info!(username = %created.username, "user created");
        self.emit(DirectoryEvent::Created {
            username: created.username.clone(),
        })
        .await;
        Ok(created)
    }

    /// Finds a record by exact username; absent is a structured `NotFound`.
    pub async fn search_user(&self, username: &str) -> Result<UserRecord> {
        match self.repository.find_by_username(username).await? {
            Some(record) => {
                self.emit(DirectoryEvent::Found {
                    username: username.to_string(),
                })
                .await;
                Ok(record)
            }
            None => {
                self.emit(DirectoryEvent::NotFound {
                    username: username.to_string(),
                })
                .await;
                Err(RosterError::not_found(username))
            }
        }
    }

    /// Updates the record keyed by the submission's hidden `edit-username`
    /// token. The visible username field may differ, renaming the record.
    ///
    /// A submission without a new file keeps the stored image.
    pub async fn edit_user(&self, submission: &FormSubmission) -> Result<UserRecord> {
        let previous = submission.require(fields::EDIT_USERNAME)?.to_string();
        let existing = self
            .repository
            .find_by_username(&previous)
            .await?
            .ok_or_else(|| RosterError::not_found(&previous))?;

        let image = self
            .resolve_upload(submission)
            .await?
            .unwrap_or(existing.image);
        let record = record_from_submission(submission, image)?;

        let updated = self.repository.update(&previous, &record).await?;
        tracing::info!(previous = %previous, username = %updated.username, "user updated");
        self.emit(DirectoryEvent::Updated {
            username: updated.username.clone(),
        })
        .await;
        Ok(updated)
    }

    /// Deletes the record keyed by `username` after confirming it exists;
    /// absent is a structured `NotFound` and the store delete is never
    /// invoked.
    pub async fn delete_user(&self, username: &str) -> Result<UserRecord> {
        if self.repository.find_by_username(username).await?.is_none() {
            self.emit(DirectoryEvent::NotFound {
                username: username.to_string(),
            })
            .await;
            return Err(RosterError::not_found(username));
        }

        let removed = self.repository.delete(username).await?;
        tracing::info!(username = %username, "user deleted");
        self.emit(DirectoryEvent::Deleted {
            username: username.to_string(),
        })
        .await;
        Ok(removed)
    }

    /// Returns every stored record, in the store's order.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.repository.list_all().await
    }
}
