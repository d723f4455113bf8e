//! Project aggregate
//!
//! A `Project` owns its membership rows and results by value. The methods here
//! only touch that in-memory state; persisting the outcome is the caller's job
//! (see `service::membership`).

use crate::entity::{
    error::MembershipError,
    types::{Collaborator, PersonProject, ProjectResult},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A research project with its collaborators and results
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub sponsor: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub finish_date: Option<DateTime<Utc>>,
    pub is_finished: bool,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
    pub results: Vec<ProjectResult>,
    pub person_projects: Vec<PersonProject>,
}

/// Fields supplied when creating a project
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProjectDraft {
    pub description: String,
    pub sponsor: String,
}

/// Listing shape: identity, sponsor and loaded relations
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: i64,
    pub description: Option<String>,
    pub sponsor: Option<String>,
    pub person_projects: Vec<PersonProject>,
    pub results: Vec<ProjectResult>,
}

impl From<Project> for ProjectView {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            description: project.description,
            sponsor: project.sponsor,
            person_projects: project.person_projects,
            results: project.results,
        }
    }
}

impl Project {
    /// True iff a result with this id is attached
    pub fn has_result(&self, result_id: i64) -> bool {
        self.results.iter().any(|result| result.id == result_id)
    }

    /// True iff the person already has a membership row here
    pub fn person_already_member(&self, person_id: i64) -> bool {
        self.person_projects
            .iter()
            .any(|member| member.person_id == person_id)
    }

    /// Membership row for a person, if any
    pub fn member(&self, person_id: i64) -> Option<&PersonProject> {
        self.person_projects
            .iter()
            .find(|member| member.person_id == person_id)
    }

    /// Build an unsaved membership row for a new member.
    ///
    /// Unrecognised roles fall back to `MEMBER`.
    pub fn stage_member(&self, person_id: i64, role: &str) -> PersonProject {
        PersonProject {
            id: None,
            person_id,
            project_id: self.id,
            role: Collaborator::parse_or_default(role),
        }
    }

    /// Append a saved membership row
    pub fn push_member(&mut self, member: PersonProject) {
        self.person_projects.push(member);
    }

    /// Change the role of an existing member and return the updated row.
    ///
    /// Unlike [`Project::stage_member`], an unrecognised role is rejected and
    /// the member keeps the previous role.
    pub fn apply_role(
        &mut self,
        person_id: i64,
        role: &str,
    ) -> Result<PersonProject, MembershipError> {
        let role: Collaborator = role
            .parse()
            .map_err(|_| MembershipError::InvalidRole(role.to_string()))?;

        let member = self
            .person_projects
            .iter_mut()
            .find(|member| member.person_id == person_id)
            .ok_or(MembershipError::PersonNotRelated(person_id))?;
        member.role = role;

        Ok(member.clone())
    }

    /// Drop a membership row by its storage id
    pub fn detach_member(&mut self, member: &PersonProject) {
        self.person_projects.retain(|existing| existing.id != member.id);
    }

    /// Attach a result to this project, re-pointing its owner
    pub fn attach_result(&mut self, mut result: ProjectResult) {
        result.project_id = self.id;
        match self.results.iter_mut().find(|existing| existing.id == result.id) {
            Some(existing) => *existing = result,
            None => self.results.push(result),
        }
    }

    /// Drop a result by id; returns whether it was attached
    pub fn detach_result(&mut self, result_id: i64) -> bool {
        let before = self.results.len();
        self.results.retain(|result| result.id != result_id);
        self.results.len() != before
    }
}
