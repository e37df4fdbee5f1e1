/// Error handling for the web server
///
/// One error type for every handler, mapped to the responses a browser-facing
/// application wants: unauthenticated access redirects to the login page,
/// stale or forged ids become a plain 404 page, and internal failures are
/// logged without leaking detail to the client.
///
/// Validation and conflict errors on forms are usually handled in the
/// originating handler by re-rendering the form with a message; the variants
/// here cover the cases where they propagate out instead.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt;

/// Handler result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error type
#[derive(Debug)]
pub enum AppError {
    /// Invalid form input (422)
    Validation(String),

    /// Uniqueness constraint violation, e.g. duplicate username (409)
    Conflict(String),

    /// Referenced id does not resolve to a record (404)
    NotFound(String),

    /// Unauthenticated access to a protected operation (redirect to /login)
    Auth,

    /// Internal server error (500)
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Auth => write!(f, "Authentication required"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth => Redirect::to("/login").into_response(),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Html(format!("<h1>404 Not Found</h1><p>{}</p>", msg)),
            )
                .into_response(),
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(format!("<h1>Invalid input</h1><p>{}</p>", msg)),
            )
                .into_response(),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                Html(format!("<h1>Conflict</h1><p>{}</p>", msg)),
            )
                .into_response(),
            AppError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Something went wrong</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}

/// Convert sqlx errors to application errors
///
/// Unique constraint violations on the users table surface as conflicts so
/// registration and email change can show a recoverable message.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("username") {
                        return AppError::Conflict("That username is already taken".to_string());
                    }
                    if constraint.contains("email") {
                        return AppError::Conflict("That email is already registered".to_string());
                    }
                    return AppError::Conflict(format!("Constraint violation: {}", constraint));
                }

                AppError::Internal(format!("Database error: {}", db_err))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password hashing errors to application errors
impl From<tasknest_shared::auth::password::PasswordError> for AppError {
    fn from(err: tasknest_shared::auth::password::PasswordError) -> Self {
        AppError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert template rendering errors to application errors
impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        AppError::Internal(format!("Template rendering failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Validation("Title too long".to_string());
        assert_eq!(err.to_string(), "Validation failed: Title too long");

        let err = AppError::NotFound("Task not found".to_string());
        assert_eq!(err.to_string(), "Not found: Task not found");
    }

    #[test]
    fn test_auth_error_redirects_to_login() {
        let response = AppError::Auth.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").map(|v| v.to_str().unwrap()),
            Some("/login")
        );
    }

    #[test]
    fn test_not_found_is_404() {
        let response = AppError::NotFound("gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
