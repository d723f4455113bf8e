//! Failures raised while editing a project's members or results.

/// Error returned by project membership and result operations
#[derive(Debug, thiserror::Error)]
pub enum MembershipError {
    /// Role change requested with a value outside the collaborator roles
    #[error("Could not edit member")]
    InvalidRole(String),

    /// No membership row links the person to the project
    #[error("Provided person not related to project")]
    PersonNotRelated(i64),

    /// Result id does not exist
    #[error("Could not find result")]
    ResultNotFound(i64),

    /// Underlying persistence failure, message kept as-is
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
