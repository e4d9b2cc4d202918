use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting scraped from a channel, enriched with extracted fields.
///
/// `url` is the canonical message URL and the sole deduplication key.
/// Extracted fields are best-effort; any of them may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    pub id: Uuid,
    pub channel: String,
    pub text: String,
    pub url: String,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub salary: Option<String>,
    pub sphere: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A candidate posting before it has passed the dedup gate.
#[derive(Debug, Clone)]
pub struct NewVacancy {
    pub channel: String,
    pub text: String,
    pub url: String,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub salary: Option<String>,
    pub sphere: Option<String>,
}
