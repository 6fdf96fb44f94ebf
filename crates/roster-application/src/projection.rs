//! Record projection for server-rendered responses.
//!
//! Maps stored records into the response payload shape and renders the two
//! HTML bodies the directory serves: the pre-filled edit form returned by a
//! search, and the all-users list page. Fields are always accessed by name;
//! a record with no image renders a placeholder rather than a broken
//! `<img>`.

use minijinja::{context, Environment};
use serde::Serialize;

use roster_core::error::{Result, RosterError};
use roster_core::user::UserRecord;

/// Response payload shape for a single record: every field materialized as a
/// display string, unset fields as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub username: String,
    pub email: String,
    pub telephone: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub profession: String,
    /// Uploaded image filename, empty if none; the templates fall back to a
    /// placeholder when empty
    pub image: String,
}

impl From<&UserRecord> for UserView {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            email: record.email.clone().unwrap_or_default(),
            telephone: record.telephone.clone().unwrap_or_default(),
            first_name: record.first_name.clone().unwrap_or_default(),
            last_name: record.last_name.clone().unwrap_or_default(),
            birth_date: record
                .birth_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            profession: record.profession.clone().unwrap_or_default(),
            image: record.image.clone(),
        }
    }
}

/// Template-backed renderer for the search/edit and list responses.
pub struct UserProjection {
    env: Environment<'static>,
}

impl UserProjection {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("edit_form.html", include_str!("../templates/edit_form.html"))
            .map_err(template_error)?;
        env.add_template("user_list.html", include_str!("../templates/user_list.html"))
            .map_err(template_error)?;
        Ok(Self { env })
    }

    /// Renders the record's fields pre-filled into an editable form, with a
    /// hidden field carrying the record's current username so the edit
    /// submission can locate it even if the visible username is changed.
    pub fn render_edit_form(&self, record: &UserRecord) -> Result<String> {
        let view = UserView::from(record);
        self.env
            .get_template("edit_form.html")
            .map_err(template_error)?
            .render(context! { user => view })
            .map_err(template_error)
    }

    /// Renders the summary list page for every given record, in order.
    pub fn render_user_list(&self, records: &[UserRecord]) -> Result<String> {
        let views: Vec<UserView> = records.iter().map(UserView::from).collect();
        self.env
            .get_template("user_list.html")
            .map_err(template_error)?
            .render(context! { users => views })
            .map_err(template_error)
    }
}

fn template_error(err: minijinja::Error) -> RosterError {
    RosterError::template(err.to_string())
}
