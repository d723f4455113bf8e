//! HTTP API Layer
//!
//! REST endpoints for persons and projects. Handlers translate requests into
//! service calls and map failures onto [`ApiError`](error::ApiError).

use crate::storage::PersistenceGateway;
use std::sync::Arc;

// Error taxonomy and response payload
pub mod error;

// Person endpoints (GET)
pub mod persons;

// Project endpoints, including member and result edits
pub mod projects;

// OpenAPI document
pub mod docs;

pub use persons::create_person_routes;
pub use projects::create_project_routes;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway backing every request
    pub gateway: Arc<dyn PersistenceGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}
