//! Router-facing handlers.
//!
//! `DirectoryFacade` is the embeddable surface an external HTTP router wires
//! to the POST routes: each handler consumes a parsed [`FormSubmission`] and
//! produces a [`Reply`]. Static entry pages and port binding stay with the
//! embedding process.

use roster_core::submission::FormSubmission;

use crate::directory_service::{fields, DirectoryService};
use crate::projection::UserProjection;
use crate::reply::Reply;

pub struct DirectoryFacade {
    service: DirectoryService,
    projection: UserProjection,
}

impl DirectoryFacade {
    pub fn new(service: DirectoryService) -> roster_core::Result<Self> {
        Ok(Self {
            service,
            projection: UserProjection::new()?,
        })
    }

    /// POST /create_user: fields + optional `image` file.
    pub async fn handle_create(&self, submission: &FormSubmission) -> Reply {
        match self.service.create_user(submission).await {
            Ok(_) => Reply::redirect_to_index(),
            Err(err) => Reply::from_error("create", &err),
        }
    }

    /// POST /search_user: find by `username` field, reply with the pre-filled
    /// edit form.
    pub async fn handle_search(&self, submission: &FormSubmission) -> Reply {
        let username = match submission.require(fields::USERNAME) {
            Ok(username) => username,
            Err(err) => return Reply::from_error("search", &err),
        };

        match self.service.search_user(username).await {
            Ok(record) => match self.projection.render_edit_form(&record) {
                Ok(body) => Reply::Html { body },
                Err(err) => Reply::from_error("search", &err),
            },
            Err(err) => Reply::from_error("search", &err),
        }
    }

    /// POST /edit_user: update by the hidden `edit-username` field.
    pub async fn handle_edit(&self, submission: &FormSubmission) -> Reply {
        match self.service.edit_user(submission).await {
            Ok(_) => Reply::redirect_to_index(),
            Err(err) => Reply::from_error("update", &err),
        }
    }

    /// POST /view_user: list every record.
    pub async fn handle_view(&self) -> Reply {
        match self.service.list_users().await {
            Ok(records) => match self.projection.render_user_list(&records) {
                Ok(body) => Reply::Html { body },
                Err(err) => Reply::from_error("view", &err),
            },
            Err(err) => Reply::from_error("view", &err),
        }
    }

    /// POST /delete_user: delete by `username` field.
    pub async fn handle_delete(&self, submission: &FormSubmission) -> Reply {
        let username = match submission.require(fields::USERNAME) {
            Ok(username) => username,
            Err(err) => return Reply::from_error("delete", &err),
        };

        match self.service.delete_user(username).await {
            Ok(_) => Reply::redirect_to_index(),
            Err(err) => Reply::from_error("delete", &err),
        }
    }
}
