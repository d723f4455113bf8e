//! Record types for people, memberships and results.
//!
//! Relations are held by id: a `PersonProject` stores both foreign keys and
//! owners load their collections by value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Role a person plays inside a project
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Collaborator {
    /// Leads the project
    Coordinator,
    /// Regular participant (default role)
    #[default]
    Member,
    /// Senior research contributor
    Researcher,
    /// Student participant
    Student,
}

impl Collaborator {
    /// Every role, in storage order
    pub const ALL: [Collaborator; 4] = [
        Collaborator::Coordinator,
        Collaborator::Member,
        Collaborator::Researcher,
        Collaborator::Student,
    ];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coordinator => "COORDINATOR",
            Self::Member => "MEMBER",
            Self::Researcher => "RESEARCHER",
            Self::Student => "STUDENT",
        }
    }

    /// Parse a role, falling back to `MEMBER` for anything unrecognised
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role string that is not one of the [`Collaborator`] values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown collaborator role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Collaborator {
    type Err = UnknownRole;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == raw)
            .ok_or_else(|| UnknownRole(raw.to_string()))
    }
}

/// A person as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub institution: Option<String>,
}

/// A person together with the projects they belong to
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetail {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub institution: Option<String>,
    pub person_projects: Vec<PersonProject>,
}

impl PersonDetail {
    pub fn new(person: Person, person_projects: Vec<PersonProject>) -> Self {
        Self {
            id: person.id,
            name: person.name,
            email: person.email,
            institution: person.institution,
            person_projects,
        }
    }
}

/// Input for registering a person
#[derive(Debug, Clone, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub email: String,
    pub institution: Option<String>,
}

/// Membership of one person in one project
///
/// `id` is `None` until the row has been saved; the (person_id, project_id)
/// pair is unique in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PersonProject {
    pub id: Option<i64>,
    pub person_id: i64,
    pub project_id: i64,
    pub role: Collaborator,
}

/// An artifact produced by a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectResult {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub project_id: i64,
}

/// Input for recording a result under a project
#[derive(Debug, Clone, Deserialize)]
pub struct NewResult {
    pub title: String,
    pub description: Option<String>,
    pub project_id: i64,
}

/// One entry of a membership edit request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberEdit {
    /// Person id
    pub id: i64,
    /// Requested role, validated against [`Collaborator`]
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_parse() {
        for role in Collaborator::ALL {
            assert_eq!(role.as_str().parse::<Collaborator>(), Ok(role));
        }
    }

    #[test]
    fn role_parsing_is_case_sensitive() {
        assert_eq!(
            "member".parse::<Collaborator>(),
            Err(UnknownRole("member".to_string()))
        );
    }

    #[test]
    fn unknown_role_defaults_to_member() {
        assert_eq!(Collaborator::parse_or_default("CAPTAIN"), Collaborator::Member);
        assert_eq!(Collaborator::parse_or_default("STUDENT"), Collaborator::Student);
    }

    #[test]
    fn role_serializes_as_screaming_case() {
        let json = serde_json::to_string(&Collaborator::Coordinator).unwrap();
        assert_eq!(json, "\"COORDINATOR\"");
    }
}
