//! Person lookups and registration

use crate::{
    entity::{NewPerson, Person, PersonDetail},
    storage::PersistenceGateway,
};
use anyhow::Result;

pub async fn fetch_persons(gateway: &dyn PersistenceGateway) -> Result<Vec<Person>> {
    gateway.find_persons().await
}

/// Person by id with memberships loaded
pub async fn fetch_person(gateway: &dyn PersistenceGateway, id: i64) -> Result<Option<PersonDetail>> {
    tracing::debug!("🔎 Looking up person {}", id);
    gateway.find_person(id).await
}

pub async fn create_person(gateway: &dyn PersistenceGateway, person: &NewPerson) -> Result<Person> {
    let created = gateway.create_person(person).await?;
    tracing::info!("🧑 Registered person {} ({})", created.id, created.email);
    Ok(created)
}
