//! Persistence layer
//!
//! - `gateway`: the repository contract used by services and handlers
//! - `sqlite`: sqlx/SQLite implementation with schema bootstrap

pub mod gateway;
pub mod sqlite;

pub use gateway::PersistenceGateway;
pub use sqlite::SqliteGateway;
