//! Inbound form submission surface.
//!
//! The embedding HTTP layer parses each `application/x-www-form-urlencoded`
//! or `multipart/form-data` request into a [`FormSubmission`] before handing
//! it to the directory. The core never touches the wire format itself.

use std::collections::HashMap;

use crate::error::{Result, RosterError};

/// A single uploaded file part from a multipart submission.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Client-supplied filename (may contain path components; the upload
    /// store strips everything but the final name)
    pub filename: String,
    /// Declared content type, if the client sent one
    pub content_type: Option<String>,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes,
        }
    }
}

/// A parsed form submission: named text fields plus at most one file part.
///
/// HTML forms submit empty strings for untouched inputs, so accessors treat
/// an empty value the same as an absent field.
#[derive(Debug, Clone, Default)]
pub struct FormSubmission {
    fields: HashMap<String, String>,
    file: Option<FilePart>,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Builder-style file attachment.
    pub fn with_file(mut self, file: FilePart) -> Self {
        self.file = Some(file);
        self
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn set_file(&mut self, file: FilePart) {
        self.file = Some(file);
    }

    /// Returns the raw field value, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Returns a non-empty field value, or `InvalidSubmission` if the field
    /// is missing or empty.
    pub fn require(&self, name: &str) -> Result<&str> {
        match self.field(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(RosterError::invalid_submission(format!(
                "missing required field '{name}'"
            ))),
        }
    }

    /// Returns an owned field value, mapping absent and empty to `None`.
    pub fn optional(&self, name: &str) -> Option<String> {
        self.field(name)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// The submission's file part, if one was attached.
    pub fn file(&self) -> Option<&FilePart> {
        self.file.as_ref()
    }
}
