//! SQLite persistence gateway
//!
//! Implements [`PersistenceGateway`] on a sqlx connection pool. Relations are
//! loaded with one query per table and grouped in memory.

use crate::{
    config::DatabaseConfig,
    entity::{
        Collaborator, NewPerson, NewResult, Person, PersonDetail, PersonProject, Project,
        ProjectDraft, ProjectResult,
    },
    storage::gateway::PersistenceGateway,
};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
    Row,
};
use std::collections::HashMap;
use std::str::FromStr;

const PROJECT_COLUMNS: &str = "id, title, description, sponsor, start_date, finish_date, \
     is_finished, created_at, updated_at";

/// SQLite-backed persistence gateway
#[derive(Debug, Clone)]
pub struct SqliteGateway {
    /// Connection pool for the application database
    pool: SqlitePool,
}

impl SqliteGateway {
    /// Wrap an existing pool. The schema is not created.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the configured database and make sure the schema exists
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .with_context(|| format!("Invalid database url '{}'", config.url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections.max(1));

        if config.is_in_memory() {
            // Every in-memory connection is its own database: keep exactly one alive.
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory '{}'", parent.display())
                })?;
            }
        }

        tracing::info!("🗄️ Opening database: {}", config.url);
        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database '{}'", config.url))?;

        let gateway = Self::new(pool);
        gateway.init_schema().await?;

        Ok(gateway)
    }

    /// Create tables and indexes.
    ///
    /// Safe to call multiple times (uses IF NOT EXISTS).
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS persons (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                institution TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                description TEXT,
                sponsor TEXT,
                start_date TEXT,
                finish_date TEXT,
                is_finished BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS person_projects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                person_id INTEGER NOT NULL REFERENCES persons(id) ON DELETE CASCADE,
                project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                role TEXT NOT NULL DEFAULT 'MEMBER'
                    CHECK (role IN ('COORDINATOR', 'MEMBER', 'RESEARCHER', 'STUDENT')),
                UNIQUE (person_id, project_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_person_projects_project ON person_projects(project_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_results_project ON results(project_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn members_where(&self, column: &str, id: i64) -> Result<Vec<PersonProject>> {
        let sql = format!(
            "SELECT id, person_id, project_id, role FROM person_projects WHERE {column} = ? ORDER BY id"
        );
        let rows = sqlx::query(&sql).bind(id).fetch_all(&self.pool).await?;
        rows.iter().map(person_project_from_row).collect()
    }

    async fn results_of(&self, project_id: i64) -> Result<Vec<ProjectResult>> {
        let rows = sqlx::query(
            "SELECT id, title, description, project_id FROM results WHERE project_id = ? ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(result_from_row).collect()
    }
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    async fn find_persons(&self) -> Result<Vec<Person>> {
        let rows = sqlx::query("SELECT id, name, email, institution FROM persons ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(person_from_row).collect()
    }

    async fn find_person(&self, id: i64) -> Result<Option<PersonDetail>> {
        let row = sqlx::query("SELECT id, name, email, institution FROM persons WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let person = person_from_row(&row)?;
                let memberships = self.members_where("person_id", id).await?;
                Ok(Some(PersonDetail::new(person, memberships)))
            }
            None => Ok(None),
        }
    }

    async fn create_person(&self, person: &NewPerson) -> Result<Person> {
        let done = sqlx::query("INSERT INTO persons (name, email, institution) VALUES (?, ?, ?)")
            .bind(&person.name)
            .bind(&person.email)
            .bind(&person.institution)
            .execute(&self.pool)
            .await?;

        Ok(Person {
            id: done.last_insert_rowid(),
            name: person.name.clone(),
            email: person.email.clone(),
            institution: person.institution.clone(),
        })
    }

    async fn find_projects(&self) -> Result<Vec<Project>> {
        let rows = sqlx::query(&format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        let mut members: HashMap<i64, Vec<PersonProject>> = HashMap::new();
        for row in sqlx::query("SELECT id, person_id, project_id, role FROM person_projects ORDER BY id")
            .fetch_all(&self.pool)
            .await?
        {
            let member = person_project_from_row(&row)?;
            members.entry(member.project_id).or_default().push(member);
        }

        let mut results: HashMap<i64, Vec<ProjectResult>> = HashMap::new();
        for row in sqlx::query("SELECT id, title, description, project_id FROM results ORDER BY id")
            .fetch_all(&self.pool)
            .await?
        {
            let result = result_from_row(&row)?;
            results.entry(result.project_id).or_default().push(result);
        }

        rows.iter()
            .map(|row| {
                let mut project = project_from_row(row)?;
                project.person_projects = members.remove(&project.id).unwrap_or_default();
                project.results = results.remove(&project.id).unwrap_or_default();
                Ok::<_, anyhow::Error>(project)
            })
            .collect()
    }

    async fn find_project(&self, id: i64) -> Result<Option<Project>> {
        let row = sqlx::query(&format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut project = project_from_row(&row)?;
        project.person_projects = self.members_where("project_id", id).await?;
        project.results = self.results_of(id).await?;
        Ok(Some(project))
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Project> {
        let now = Utc::now();
        let done = sqlx::query(
            r#"
            INSERT INTO projects (description, sponsor, is_finished, created_at, updated_at)
            VALUES (?, ?, 0, ?, ?)
            "#,
        )
        .bind(&draft.description)
        .bind(&draft.sponsor)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Project {
            id: done.last_insert_rowid(),
            title: None,
            description: Some(draft.description.clone()),
            sponsor: Some(draft.sponsor.clone()),
            start_date: None,
            finish_date: None,
            is_finished: false,
            created_at: now,
            updated_at: now,
            results: Vec::new(),
            person_projects: Vec::new(),
        })
    }

    async fn save_project(&self, project: &Project) -> Result<Project> {
        let now = Utc::now();
        let done = sqlx::query(
            r#"
            UPDATE projects SET
                title = ?,
                description = ?,
                sponsor = ?,
                start_date = ?,
                finish_date = ?,
                is_finished = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.sponsor)
        .bind(project.start_date)
        .bind(project.finish_date)
        .bind(project.is_finished)
        .bind(now)
        .bind(project.id)
        .execute(&self.pool)
        .await?;

        if done.rows_affected() == 0 {
            bail!("Project {} does not exist", project.id);
        }

        for result in &project.results {
            sqlx::query("UPDATE results SET project_id = ? WHERE id = ?")
                .bind(project.id)
                .bind(result.id)
                .execute(&self.pool)
                .await?;
        }

        let mut saved = project.clone();
        saved.updated_at = now;
        Ok(saved)
    }

    async fn delete_project(&self, id: i64) -> Result<bool> {
        let done = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }

    async fn find_person_project(
        &self,
        person_id: i64,
        project_id: i64,
    ) -> Result<Option<PersonProject>> {
        let row = sqlx::query(
            "SELECT id, person_id, project_id, role FROM person_projects WHERE person_id = ? AND project_id = ?",
        )
        .bind(person_id)
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(person_project_from_row).transpose()
    }

    async fn save_person_project(&self, member: &PersonProject) -> Result<PersonProject> {
        match member.id {
            Some(id) => {
                let done = sqlx::query("UPDATE person_projects SET role = ? WHERE id = ?")
                    .bind(member.role.as_str())
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
                if done.rows_affected() == 0 {
                    bail!("Membership {} does not exist", id);
                }
                Ok(member.clone())
            }
            None => {
                let done = sqlx::query(
                    "INSERT INTO person_projects (person_id, project_id, role) VALUES (?, ?, ?)",
                )
                .bind(member.person_id)
                .bind(member.project_id)
                .bind(member.role.as_str())
                .execute(&self.pool)
                .await?;

                let mut saved = member.clone();
                saved.id = Some(done.last_insert_rowid());
                Ok(saved)
            }
        }
    }

    async fn delete_person_project(&self, member: &PersonProject) -> Result<()> {
        let query = match member.id {
            Some(id) => sqlx::query("DELETE FROM person_projects WHERE id = ?").bind(id),
            None => sqlx::query("DELETE FROM person_projects WHERE person_id = ? AND project_id = ?")
                .bind(member.person_id)
                .bind(member.project_id),
        };
        query.execute(&self.pool).await?;
        Ok(())
    }

    async fn find_result(&self, id: i64) -> Result<Option<ProjectResult>> {
        let row = sqlx::query("SELECT id, title, description, project_id FROM results WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(result_from_row).transpose()
    }

    async fn create_result(&self, result: &NewResult) -> Result<ProjectResult> {
        let done = sqlx::query("INSERT INTO results (title, description, project_id) VALUES (?, ?, ?)")
            .bind(&result.title)
            .bind(&result.description)
            .bind(result.project_id)
            .execute(&self.pool)
            .await?;

        Ok(ProjectResult {
            id: done.last_insert_rowid(),
            title: result.title.clone(),
            description: result.description.clone(),
            project_id: result.project_id,
        })
    }

    async fn delete_result(&self, id: i64) -> Result<()> {
        let done = sqlx::query("DELETE FROM results WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            bail!("Result {} does not exist", id);
        }
        Ok(())
    }
}

fn person_from_row(row: &SqliteRow) -> Result<Person> {
    Ok(Person {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        institution: row.try_get("institution")?,
    })
}

fn person_project_from_row(row: &SqliteRow) -> Result<PersonProject> {
    let role: String = row.try_get("role")?;
    Ok(PersonProject {
        id: Some(row.try_get("id")?),
        person_id: row.try_get("person_id")?,
        project_id: row.try_get("project_id")?,
        role: role.parse::<Collaborator>()?,
    })
}

fn result_from_row(row: &SqliteRow) -> Result<ProjectResult> {
    Ok(ProjectResult {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        project_id: row.try_get("project_id")?,
    })
}

fn project_from_row(row: &SqliteRow) -> Result<Project> {
    Ok(Project {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        sponsor: row.try_get("sponsor")?,
        start_date: row.try_get("start_date")?,
        finish_date: row.try_get("finish_date")?,
        is_finished: row.try_get("is_finished")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        results: Vec::new(),
        person_projects: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn gateway() -> SqliteGateway {
        SqliteGateway::connect(&DatabaseConfig::in_memory())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let gateway = gateway().await;
        gateway.init_schema().await.unwrap();
    }

    #[tokio::test]
    async fn created_project_reads_back_with_timestamps() {
        let gateway = gateway().await;
        let created = gateway
            .create_project(&ProjectDraft {
                description: "d".to_string(),
                sponsor: "s".to_string(),
            })
            .await
            .unwrap();

        let loaded = gateway.find_project(created.id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn duplicate_membership_is_rejected() {
        let gateway = gateway().await;
        let person = gateway
            .create_person(&NewPerson {
                name: "Ada".to_string(),
                email: "ada@example.org".to_string(),
                institution: None,
            })
            .await
            .unwrap();
        let project = gateway
            .create_project(&ProjectDraft {
                description: "d".to_string(),
                sponsor: "s".to_string(),
            })
            .await
            .unwrap();

        let member = project.stage_member(person.id, "MEMBER");
        gateway.save_person_project(&member).await.unwrap();
        assert!(gateway.save_person_project(&member).await.is_err());
    }

    #[tokio::test]
    async fn deleting_missing_result_fails() {
        let gateway = gateway().await;
        let err = gateway.delete_result(404).await.unwrap_err();
        assert_eq!(err.to_string(), "Result 404 does not exist");
    }
}
