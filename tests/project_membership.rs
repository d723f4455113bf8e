//! Membership and result management against an in-memory SQLite store.

use lattes::{
    config::DatabaseConfig,
    entity::{MemberEdit, NewPerson, NewResult, ProjectDraft},
    service::{person, project as project_service, result},
    Collaborator, MembershipError, MembershipService, PersistenceGateway, Project, SqliteGateway,
};
use std::sync::Arc;

struct Fixture {
    gateway: Arc<dyn PersistenceGateway>,
    service: MembershipService,
    project: Project,
}

async fn fixture() -> Fixture {
    let gateway: Arc<dyn PersistenceGateway> = Arc::new(
        SqliteGateway::connect(&DatabaseConfig::in_memory())
            .await
            .unwrap(),
    );
    let project = project_service::create_project(
        gateway.as_ref(),
        &ProjectDraft {
            description: "coastal erosion survey".to_string(),
            sponsor: "FAPESP".to_string(),
        },
    )
    .await
    .unwrap();

    Fixture {
        service: MembershipService::new(gateway.clone()),
        gateway,
        project,
    }
}

async fn new_person(gateway: &dyn PersistenceGateway, name: &str) -> i64 {
    person::create_person(
        gateway,
        &NewPerson {
            name: name.to_string(),
            email: format!("{}@example.org", name.to_lowercase()),
            institution: Some("USP".to_string()),
        },
    )
    .await
    .unwrap()
    .id
}

async fn reload(fx: &Fixture) -> Project {
    project_service::fetch_project(fx.gateway.as_ref(), fx.project.id)
        .await
        .unwrap()
        .unwrap()
}

fn edit(id: i64, role: &str) -> MemberEdit {
    MemberEdit {
        id,
        role: role.to_string(),
    }
}

#[tokio::test]
async fn edit_members_adds_new_member() {
    let mut fx = fixture().await;
    let ada = new_person(fx.gateway.as_ref(), "Ada").await;

    let mut project = fx.project.clone();
    fx.service
        .edit_members(&mut project, &[edit(ada, "MEMBER")])
        .await
        .unwrap();
    fx.project = project;

    assert!(fx.project.person_already_member(ada));
    let stored = reload(&fx).await;
    assert!(stored.person_already_member(ada));
    assert_eq!(stored.member(ada).unwrap().role, Collaborator::Member);
    assert!(stored.member(ada).unwrap().id.is_some());
}

#[tokio::test]
async fn new_member_with_unknown_role_defaults_to_member() {
    let fx = fixture().await;
    let ada = new_person(fx.gateway.as_ref(), "Ada").await;

    let mut project = fx.project.clone();
    fx.service
        .edit_members(&mut project, &[edit(ada, "WIZARD")])
        .await
        .unwrap();

    assert_eq!(reload(&fx).await.member(ada).unwrap().role, Collaborator::Member);
}

#[tokio::test]
async fn existing_member_role_is_updated() {
    let fx = fixture().await;
    let ada = new_person(fx.gateway.as_ref(), "Ada").await;

    let mut project = fx.project.clone();
    fx.service.add_member(&mut project, ada, "STUDENT").await.unwrap();
    fx.service
        .edit_members(&mut project, &[edit(ada, "COORDINATOR")])
        .await
        .unwrap();

    let stored = reload(&fx).await;
    assert_eq!(stored.person_projects.len(), 1);
    assert_eq!(stored.member(ada).unwrap().role, Collaborator::Coordinator);
}

#[tokio::test]
async fn existing_member_with_unknown_role_is_rejected_and_unchanged() {
    let fx = fixture().await;
    let ada = new_person(fx.gateway.as_ref(), "Ada").await;

    let mut project = fx.project.clone();
    fx.service.add_member(&mut project, ada, "RESEARCHER").await.unwrap();

    let err = fx
        .service
        .edit_members(&mut project, &[edit(ada, "WIZARD")])
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipError::InvalidRole(_)));
    assert_eq!(project.member(ada).unwrap().role, Collaborator::Researcher);
    assert_eq!(reload(&fx).await.member(ada).unwrap().role, Collaborator::Researcher);
}

#[tokio::test]
async fn failing_entry_keeps_earlier_entries() {
    let fx = fixture().await;
    let ada = new_person(fx.gateway.as_ref(), "Ada").await;
    let bob = new_person(fx.gateway.as_ref(), "Bob").await;

    let mut project = fx.project.clone();
    fx.service.add_member(&mut project, ada, "MEMBER").await.unwrap();

    let result = fx
        .service
        .edit_members(&mut project, &[edit(bob, "STUDENT"), edit(ada, "nope")])
        .await;

    assert!(result.is_err());
    assert!(reload(&fx).await.person_already_member(bob));
}

#[tokio::test]
async fn removing_member_deletes_row() {
    let fx = fixture().await;
    let ada = new_person(fx.gateway.as_ref(), "Ada").await;

    let mut project = fx.project.clone();
    fx.service.add_member(&mut project, ada, "MEMBER").await.unwrap();
    fx.service
        .remove_person_from_project(&mut project, ada)
        .await
        .unwrap();

    assert!(!project.person_already_member(ada));
    assert!(!reload(&fx).await.person_already_member(ada));

    let detail = person::fetch_person(fx.gateway.as_ref(), ada)
        .await
        .unwrap()
        .unwrap();
    assert!(detail.person_projects.is_empty());
}

#[tokio::test]
async fn removing_stranger_fails_and_keeps_members() {
    let fx = fixture().await;
    let ada = new_person(fx.gateway.as_ref(), "Ada").await;
    let bob = new_person(fx.gateway.as_ref(), "Bob").await;

    let mut project = fx.project.clone();
    fx.service.add_member(&mut project, ada, "MEMBER").await.unwrap();
    let before = project.person_projects.clone();

    let err = fx
        .service
        .remove_person_from_project(&mut project, bob)
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipError::PersonNotRelated(id) if id == bob));
    assert_eq!(err.to_string(), "Provided person not related to project");
    assert_eq!(project.person_projects, before);
    assert_eq!(reload(&fx).await.person_projects, before);
}

#[tokio::test]
async fn result_attach_and_remove() {
    let fx = fixture().await;
    let other = project_service::create_project(
        fx.gateway.as_ref(),
        &ProjectDraft {
            description: "other".to_string(),
            sponsor: "CAPES".to_string(),
        },
    )
    .await
    .unwrap();
    let paper = result::create_result(
        fx.gateway.as_ref(),
        &NewResult {
            title: "Shoreline retreat rates".to_string(),
            description: None,
            project_id: other.id,
        },
    )
    .await
    .unwrap();

    let mut project = fx.project.clone();
    fx.service
        .add_result_to_project(&mut project, paper.id)
        .await
        .unwrap();
    assert!(project.has_result(paper.id));
    assert!(reload(&fx).await.has_result(paper.id));

    fx.service
        .remove_result_from_project(&mut project, paper.id)
        .await
        .unwrap();
    assert!(!project.has_result(paper.id));
    assert!(!reload(&fx).await.has_result(paper.id));
    assert!(result::fetch_raw_result(fx.gateway.as_ref(), paper.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn attaching_missing_result_fails() {
    let fx = fixture().await;

    let mut project = fx.project.clone();
    let err = fx
        .service
        .add_result_to_project(&mut project, 404)
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipError::ResultNotFound(404)));
    assert_eq!(err.to_string(), "Could not find result");
    assert!(project.results.is_empty());
}

#[tokio::test]
async fn removing_missing_result_keeps_storage_message() {
    let fx = fixture().await;

    let mut project = fx.project.clone();
    let err = fx
        .service
        .remove_result_from_project(&mut project, 404)
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipError::Storage(_)));
    assert_eq!(err.to_string(), "Result 404 does not exist");
}

#[tokio::test]
async fn deleting_project_cascades() {
    let fx = fixture().await;
    let ada = new_person(fx.gateway.as_ref(), "Ada").await;

    let mut project = fx.project.clone();
    fx.service.add_member(&mut project, ada, "MEMBER").await.unwrap();
    let paper = result::create_result(
        fx.gateway.as_ref(),
        &NewResult {
            title: "Dataset".to_string(),
            description: Some("raw transects".to_string()),
            project_id: project.id,
        },
    )
    .await
    .unwrap();

    assert!(project_service::delete_project(fx.gateway.as_ref(), project.id)
        .await
        .unwrap());

    assert!(fx
        .gateway
        .find_person_project(ada, project.id)
        .await
        .unwrap()
        .is_none());
    assert!(result::fetch_raw_result(fx.gateway.as_ref(), paper.id)
        .await
        .unwrap()
        .is_none());
    assert!(!project_service::delete_project(fx.gateway.as_ref(), project.id)
        .await
        .unwrap());
}
