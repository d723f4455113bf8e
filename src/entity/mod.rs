//! Domain entities
//!
//! Records for people, projects, memberships and results, plus the in-memory
//! project aggregate that edits memberships and result attachments.

pub mod error;
pub mod project;
pub mod types;

pub use error::MembershipError;
pub use project::{Project, ProjectDraft, ProjectView};
pub use types::{
    Collaborator, MemberEdit, NewPerson, NewResult, Person, PersonDetail, PersonProject,
    ProjectResult, UnknownRole,
};
