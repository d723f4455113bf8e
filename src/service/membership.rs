//! Project membership and result management
//!
//! Composes the in-memory [`Project`] operations with their persistence
//! steps. The steps are separate gateway calls: a failure part-way leaves
//! the rows already written in place and the in-memory project ahead of
//! storage.

use crate::{
    entity::{MemberEdit, MembershipError, Project},
    service::{person_project, project as project_service, result},
    storage::PersistenceGateway,
};
use std::sync::Arc;

/// Applies membership and result changes to a loaded project
#[derive(Clone)]
pub struct MembershipService {
    gateway: Arc<dyn PersistenceGateway>,
}

impl MembershipService {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }

    /// Add or update each listed person, then persist the project.
    ///
    /// New members with an unrecognised role join as `MEMBER`; an
    /// unrecognised role for an existing member aborts the whole edit at that
    /// entry, leaving earlier entries applied.
    pub async fn edit_members(
        &self,
        project: &mut Project,
        edits: &[MemberEdit],
    ) -> Result<(), MembershipError> {
        for edit in edits {
            if project.person_already_member(edit.id) {
                self.edit_existing_member(project, edit.id, &edit.role)
                    .await?;
            } else {
                self.add_member(project, edit.id, &edit.role).await?;
            }
        }

        self.save(project).await
    }

    /// Create and persist a membership row for a new member
    pub async fn add_member(
        &self,
        project: &mut Project,
        person_id: i64,
        role: &str,
    ) -> Result<(), MembershipError> {
        let staged = project.stage_member(person_id, role);
        let saved = person_project::save_person_project(self.gateway.as_ref(), &staged).await?;

        tracing::info!(
            "👥 Added person {} to project {} as {}",
            person_id,
            project.id,
            saved.role
        );
        project.push_member(saved);
        Ok(())
    }

    /// Delete a person's membership row and persist the project
    pub async fn remove_person_from_project(
        &self,
        project: &mut Project,
        person_id: i64,
    ) -> Result<(), MembershipError> {
        let member =
            person_project::fetch_person_project(self.gateway.as_ref(), person_id, project.id)
                .await?
                .ok_or(MembershipError::PersonNotRelated(person_id))?;

        person_project::delete_person_project(self.gateway.as_ref(), &member).await?;
        project.detach_member(&member);

        tracing::info!("👋 Removed person {} from project {}", person_id, project.id);
        self.save(project).await
    }

    /// Change the role of an existing member and persist the row
    pub async fn edit_existing_member(
        &self,
        project: &mut Project,
        person_id: i64,
        role: &str,
    ) -> Result<(), MembershipError> {
        let project_id = project.id;
        let updated = project.apply_role(person_id, role).inspect_err(|err| {
            tracing::warn!(
                "⚠️ Rejected role '{}' for person {} on project {}: {}",
                role,
                person_id,
                project_id,
                err
            );
        })?;

        person_project::save_person_project(self.gateway.as_ref(), &updated).await?;
        Ok(())
    }

    /// Attach an existing result and persist the project
    pub async fn add_result_to_project(
        &self,
        project: &mut Project,
        result_id: i64,
    ) -> Result<(), MembershipError> {
        let found = result::fetch_raw_result(self.gateway.as_ref(), result_id)
            .await?
            .ok_or(MembershipError::ResultNotFound(result_id))?;

        project.attach_result(found);
        tracing::info!("📎 Attached result {} to project {}", result_id, project.id);
        self.save(project).await
    }

    /// Delete a result from storage, then drop it from the project
    pub async fn remove_result_from_project(
        &self,
        project: &mut Project,
        result_id: i64,
    ) -> Result<(), MembershipError> {
        result::delete_result(self.gateway.as_ref(), result_id).await?;
        project.detach_result(result_id);

        tracing::info!("🗑️ Removed result {} from project {}", result_id, project.id);
        self.save(project).await
    }

    async fn save(&self, project: &mut Project) -> Result<(), MembershipError> {
        let saved = project_service::save_project(self.gateway.as_ref(), project).await?;
        *project = saved;
        Ok(())
    }
}
