//! Lattes API server entry point
//!
//! Loads configuration from the environment and serves:
//! - Persons at /persons and /persons/{id}
//! - Projects, members and results under /projects
//! - OpenAPI document at /api-docs/openapi.json
//! - Health check at /healthz

use lattes::{config::Config, server::start_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (defaults to 0.0.0.0:3000 and sqlite://data/lattes.db)
    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
