use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::database::models::job::JobRow;
use crate::database::{parse_id, Job, JobFields, NewUser, Store, StoreError, User};

const JOB_COLUMNS: &str = "id, company, position, status, created_by, created_at, updated_at";

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        username TEXT NOT NULL,
        password TEXT NOT NULL,
        CONSTRAINT users_username_key UNIQUE (username)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS jobs (
        id UUID PRIMARY KEY,
        company TEXT NOT NULL,
        position TEXT NOT NULL,
        status TEXT CHECK (status IN ('pending', 'declined', 'interview')),
        created_by UUID NOT NULL REFERENCES users (id),
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS jobs_created_by_idx ON jobs (created_by)",
];

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open the pool and make sure the tables exist
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config.url.as_deref().ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;
        let parsed = url::Url::parse(url).map_err(|_| StoreError::InvalidDatabaseUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        info!(
            "Connected to database {}{}",
            parsed.host_str().unwrap_or("localhost"),
            parsed.path()
        );
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        user.check()?;

        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, username, password)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, username, password",
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_jobs(&self, owner: Uuid) -> Result<Vec<Job>, StoreError> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE created_by = $1 ORDER BY created_at, id",
            JOB_COLUMNS
        );
        let rows = sqlx::query_as::<_, JobRow>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Job::try_from).collect()
    }

    async fn find_job(&self, id: &str, owner: Uuid) -> Result<Option<Job>, StoreError> {
        let id = parse_id(id)?;
        let sql = format!("SELECT {} FROM jobs WHERE id = $1 AND created_by = $2", JOB_COLUMNS);
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Job::try_from).transpose()
    }

    async fn create_job(&self, owner: Uuid, fields: JobFields) -> Result<Job, StoreError> {
        fields.check()?;

        let now = Utc::now();
        let sql = format!(
            "INSERT INTO jobs (id, company, position, status, created_by, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {}",
            JOB_COLUMNS
        );
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&fields.company)
            .bind(&fields.position)
            .bind(fields.status.map(|s| s.as_str()))
            .bind(owner)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Job::try_from(row)
    }

    async fn update_job(&self, id: &str, owner: Uuid, fields: JobFields) -> Result<Option<Job>, StoreError> {
        let id = parse_id(id)?;
        fields.check()?;

        let sql = format!(
            "UPDATE jobs SET company = $3, position = $4, status = $5, updated_at = $6
             WHERE id = $1 AND created_by = $2
             RETURNING {}",
            JOB_COLUMNS
        );
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .bind(owner)
            .bind(&fields.company)
            .bind(&fields.position)
            .bind(fields.status.map(|s| s.as_str()))
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Job::try_from).transpose()
    }

    async fn delete_job(&self, id: &str, owner: Uuid) -> Result<Option<Job>, StoreError> {
        let id = parse_id(id)?;
        let sql = format!(
            "DELETE FROM jobs WHERE id = $1 AND created_by = $2 RETURNING {}",
            JOB_COLUMNS
        );
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Job::try_from).transpose()
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
