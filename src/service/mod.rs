//! Domain services
//!
//! Thin wrappers over the [`PersistenceGateway`](crate::storage::PersistenceGateway),
//! one set per entity, plus the membership service that composes the project
//! aggregate with its persistence steps.

pub mod membership;
pub mod person;
pub mod person_project;
pub mod project;
pub mod result;

pub use membership::MembershipService;
