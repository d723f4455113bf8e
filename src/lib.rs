//! Lattes: REST backend for research projects
//!
//! Tracks people, research projects, the roles people hold in them and the
//! results projects produce.

// Core configuration and setup
pub mod config;

// Domain records and the project membership aggregate
pub mod entity;

// Persistence gateway contract and SQLite implementation
pub mod storage;

// Thin per-entity services and membership management
pub mod service;

// HTTP API layer - REST endpoints for persons and projects
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use entity::{Collaborator, MembershipError, Person, PersonProject, Project, ProjectResult};
pub use server::{build_router, create_app, start_server};
pub use service::MembershipService;
pub use storage::{PersistenceGateway, SqliteGateway};
