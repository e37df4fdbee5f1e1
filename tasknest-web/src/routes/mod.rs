//! Request handlers
//!
//! - `tasks`: active task list and CRUD + done transition
//! - `archive`: archived task list, undo, delete
//! - `auth`: registration, login, logout
//! - `profile`: profile page, password and email changes
//! - `pages`: static pages

pub mod archive;
pub mod auth;
pub mod pages;
pub mod profile;
pub mod tasks;

use serde::Deserialize;
use uuid::Uuid;
use validator::ValidationErrors;

/// `?id=` query parameter shared by the task and archive operations
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    /// Record id supplied by the caller; may be stale or forged
    pub id: Uuid,
}

/// Collapses validator output into a single user-facing message
///
/// Forms here are small enough that showing the first failure is clearer
/// than a field-by-field listing.
pub(crate) fn validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .filter_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 3, message = "Name must be 1-3 characters"))]
        name: String,
    }

    #[test]
    fn test_validation_message_uses_declared_message() {
        let sample = Sample {
            name: "too long".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(validation_message(&errors), "Name must be 1-3 characters");
    }

    #[test]
    fn test_id_query_parses_uuid() {
        let query: IdQuery =
            serde_json::from_str(r#"{"id":"6d1a3c5e-8b4f-4a43-9c6a-2f8d39f1a001"}"#).unwrap();
        assert_eq!(
            query.id.to_string(),
            "6d1a3c5e-8b4f-4a43-9c6a-2f8d39f1a001"
        );
    }
}
