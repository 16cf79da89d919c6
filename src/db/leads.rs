use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::SubmissionRecord;

/// Append-only store for accepted submissions.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert(&self, record: &SubmissionRecord) -> Result<Uuid, String>;
}

pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn insert(&self, record: &SubmissionRecord) -> Result<Uuid, String> {
        create(&self.pool, record)
            .await
            .map_err(|e| format!("Database error: {e}"))
    }
}

pub async fn create(pool: &PgPool, record: &SubmissionRecord) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::now_v7();

    sqlx::query(
        "INSERT INTO leads (id, name, email, website, service, budget, message, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(id)
    .bind(&record.name)
    .bind(&record.email)
    .bind(record.website.as_deref())
    .bind(non_empty(&record.service))
    .bind(non_empty(&record.budget))
    .bind(record.message.as_deref())
    .bind(record.submitted_at())
    .execute(pool)
    .await?;

    Ok(id)
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}
