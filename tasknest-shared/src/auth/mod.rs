//! Authentication utilities
//!
//! - `password`: Argon2id password hashing and verification
//! - `session`: persisted login sessions backed by the `sessions` table

pub mod password;
pub mod session;
