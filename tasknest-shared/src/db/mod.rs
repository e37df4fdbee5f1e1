//! Database plumbing
//!
//! - `pool`: PostgreSQL connection pool
//! - `migrations`: embedded schema migrations, applied at startup

pub mod migrations;
pub mod pool;
