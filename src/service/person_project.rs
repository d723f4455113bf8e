//! Membership row persistence

use crate::{entity::PersonProject, storage::PersistenceGateway};
use anyhow::Result;

pub async fn fetch_person_project(
    gateway: &dyn PersistenceGateway,
    person_id: i64,
    project_id: i64,
) -> Result<Option<PersonProject>> {
    gateway.find_person_project(person_id, project_id).await
}

/// Insert or update a membership row, returning it with its id
pub async fn save_person_project(
    gateway: &dyn PersistenceGateway,
    member: &PersonProject,
) -> Result<PersonProject> {
    let saved = gateway.save_person_project(member).await?;
    tracing::debug!(
        "💾 Saved membership person={} project={} role={}",
        saved.person_id,
        saved.project_id,
        saved.role
    );
    Ok(saved)
}

pub async fn delete_person_project(
    gateway: &dyn PersistenceGateway,
    member: &PersonProject,
) -> Result<()> {
    gateway.delete_person_project(member).await
}
