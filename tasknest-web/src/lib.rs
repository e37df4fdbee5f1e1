//! # TaskNest Web Server
//!
//! Server-rendered multi-user to-do list. Users register, log in with a
//! persisted cookie session, manage prioritized tasks, and move finished
//! tasks between the active list and the archive.
//!
//! ## Module Organization
//!
//! - `app`: shared state, router, session middleware
//! - `config`: environment-based configuration
//! - `error`: unified error type mapped to HTTP responses
//! - `routes`: request handlers
//! - `views`: minijinja template rendering

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod views;
