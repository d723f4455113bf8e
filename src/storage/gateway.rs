//! Persistence gateway contract.
//!
//! Every layer above storage talks to the relational store through this
//! trait. Each call is a separate operation; nothing here spans a transaction.

use crate::entity::{
    NewPerson, NewResult, Person, PersonDetail, PersonProject, Project, ProjectDraft,
    ProjectResult,
};
use anyhow::Result;
use async_trait::async_trait;

/// Typed find / find-one / save / delete over the domain records
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// All persons, without relations
    async fn find_persons(&self) -> Result<Vec<Person>>;

    /// One person with their memberships
    async fn find_person(&self, id: i64) -> Result<Option<PersonDetail>>;

    /// Insert a person and return it with its assigned id
    async fn create_person(&self, person: &NewPerson) -> Result<Person>;

    /// All projects with memberships and results loaded
    async fn find_projects(&self) -> Result<Vec<Project>>;

    /// One project with memberships and results loaded
    async fn find_project(&self, id: i64) -> Result<Option<Project>>;

    /// Insert a project; title and dates stay unset
    async fn create_project(&self, draft: &ProjectDraft) -> Result<Project>;

    /// Write the project's columns and the ownership of its attached results
    async fn save_project(&self, project: &Project) -> Result<Project>;

    /// Delete a project and, by cascade, its memberships and results.
    /// Returns false if no such project existed.
    async fn delete_project(&self, id: i64) -> Result<bool>;

    /// Membership row for a (person, project) pair
    async fn find_person_project(
        &self,
        person_id: i64,
        project_id: i64,
    ) -> Result<Option<PersonProject>>;

    /// Insert a row without id, update the role of a row with one
    async fn save_person_project(&self, member: &PersonProject) -> Result<PersonProject>;

    async fn delete_person_project(&self, member: &PersonProject) -> Result<()>;

    async fn find_result(&self, id: i64) -> Result<Option<ProjectResult>>;

    async fn create_result(&self, result: &NewResult) -> Result<ProjectResult>;

    /// Delete a result; fails if it does not exist
    async fn delete_result(&self, id: i64) -> Result<()>;
}
