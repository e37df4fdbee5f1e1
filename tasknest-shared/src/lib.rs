//! # TaskNest Shared Library
//!
//! This crate contains the data models, authentication utilities, and
//! database plumbing shared by the TaskNest web server.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, active todos, archive, sessions)
//! - `auth`: Password hashing and session management
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TaskNest shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
