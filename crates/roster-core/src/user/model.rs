//! User record domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single user's stored attribute set, keyed by unique username.
///
/// The username is the exclusive lookup and mutation key; every other field
/// is optional form data. `image` holds the filename of the associated
/// uploaded image relative to the upload directory, or the empty string when
/// the user has none. The record never verifies that the file still exists;
/// broken references are tolerated and handled at rendering time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier; immutable key for lookups (a rename goes through
    /// the update operation's old-username parameter)
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    /// Uploaded image filename, empty if none
    #[serde(default)]
    pub image: String,
}

impl UserRecord {
    /// Creates a record with the given username and every other field unset.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
            telephone: None,
            first_name: None,
            last_name: None,
            birth_date: None,
            profession: None,
            image: String::new(),
        }
    }

    /// Whether the record references an uploaded image.
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_optional_fields() {
        let record = UserRecord::new("alice");
        assert_eq!(record.username, "alice");
        assert_eq!(record.email, None);
        assert!(!record.has_image());
    }

    #[test]
    fn test_image_defaults_to_empty_on_deserialize() {
        let record: UserRecord = serde_json::from_str(r#"{"username":"bob"}"#).unwrap();
        assert_eq!(record.image, "");
        assert!(!record.has_image());
    }

    #[test]
    fn test_serde_round_trip() {
        let record = UserRecord {
            email: Some("a@x.com".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17),
            image: "alice.png".to_string(),
            ..UserRecord::new("alice")
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: UserRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_unset_fields_are_omitted_from_json() {
        let json = serde_json::to_string(&UserRecord::new("carol")).unwrap();
        assert!(!json.contains("email"));
        assert!(json.contains(r#""image":"""#));
    }
}
