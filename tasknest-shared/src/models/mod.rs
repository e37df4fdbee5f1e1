//! Database models
//!
//! Active-record style models over `sqlx::PgPool`:
//!
//! - `user`: account records
//! - `todo`: active to-do items
//! - `archive`: completed items, restorable via undo

pub mod archive;
pub mod todo;
pub mod user;
