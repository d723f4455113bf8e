//! Result lookups and deletion

use crate::{
    entity::{NewResult, ProjectResult},
    storage::PersistenceGateway,
};
use anyhow::Result;

/// Result by id, regardless of which project owns it
pub async fn fetch_raw_result(
    gateway: &dyn PersistenceGateway,
    id: i64,
) -> Result<Option<ProjectResult>> {
    gateway.find_result(id).await
}

pub async fn create_result(gateway: &dyn PersistenceGateway, result: &NewResult) -> Result<ProjectResult> {
    let created = gateway.create_result(result).await?;
    tracing::info!("📄 Recorded result {} under project {}", created.id, created.project_id);
    Ok(created)
}

/// Delete a result. The storage error is returned untouched.
pub async fn delete_result(gateway: &dyn PersistenceGateway, id: i64) -> Result<()> {
    gateway.delete_result(id).await
}
