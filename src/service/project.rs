//! Project lookups and writes

use crate::{
    entity::{Project, ProjectDraft},
    storage::PersistenceGateway,
};
use anyhow::Result;

pub async fn fetch_projects(gateway: &dyn PersistenceGateway) -> Result<Vec<Project>> {
    gateway.find_projects().await
}

/// Project by id with memberships and results loaded
pub async fn fetch_project(gateway: &dyn PersistenceGateway, id: i64) -> Result<Option<Project>> {
    tracing::debug!("🔎 Looking up project {}", id);
    gateway.find_project(id).await
}

pub async fn create_project(gateway: &dyn PersistenceGateway, draft: &ProjectDraft) -> Result<Project> {
    let project = gateway.create_project(draft).await?;
    tracing::info!("📁 Created project {} (sponsor: {})", project.id, draft.sponsor);
    Ok(project)
}

pub async fn save_project(gateway: &dyn PersistenceGateway, project: &Project) -> Result<Project> {
    gateway.save_project(project).await
}

/// Delete a project together with its memberships and results
pub async fn delete_project(gateway: &dyn PersistenceGateway, id: i64) -> Result<bool> {
    let deleted = gateway.delete_project(id).await?;
    if deleted {
        tracing::info!("🗑️ Deleted project {} with its memberships and results", id);
    }
    Ok(deleted)
}
