use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vacancy_dto::UpdateVacancyPayload;
use crate::error::{Error, Result};
use crate::models::vacancy::{NewVacancy, Vacancy};
use crate::utils::time;
use crate::utils::vacancy_filter::{apply_filters, paginate, FilterCriteria, Pagination};

const VACANCY_COLUMNS: &str =
    r#"id, channel, text, url, "position", employment_type, salary, sphere, created_at, updated_at"#;

#[derive(Clone)]
pub struct VacancyService {
    pool: PgPool,
}

impl VacancyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Dedup gate and persistence in one atomic statement. The unique
    /// index on `url` decides novelty: a conflict means the posting was
    /// already stored and `None` is returned (idempotent no-op). There is
    /// no separate existence pre-check, so overlapping ingestion passes
    /// cannot insert the same URL twice.
    pub async fn insert_if_new(&self, candidate: &NewVacancy) -> Result<Option<Vacancy>> {
        let query = format!(
            r#"INSERT INTO vacancies (channel, text, url, "position", employment_type, salary, sphere)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               ON CONFLICT (url) DO NOTHING
               RETURNING {}"#,
            VACANCY_COLUMNS
        );

        let vacancy = sqlx::query_as::<_, Vacancy>(&query)
            .bind(&candidate.channel)
            .bind(&candidate.text)
            .bind(&candidate.url)
            .bind(&candidate.position)
            .bind(&candidate.employment_type)
            .bind(&candidate.salary)
            .bind(&candidate.sphere)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vacancy)
    }

    /// Runs the query path: fetch the stored set newest-first, apply the
    /// in-memory filter stages, then paginate.
    pub async fn list(
        &self,
        criteria: &FilterCriteria,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Vacancy>, Pagination)> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);

        let query = format!(
            "SELECT {} FROM vacancies ORDER BY created_at DESC",
            VACANCY_COLUMNS
        );
        let all = sqlx::query_as::<_, Vacancy>(&query)
            .fetch_all(&self.pool)
            .await?;

        let matches = apply_filters(&all, criteria, time::now());
        Ok(paginate(matches, page, limit))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vacancy> {
        let query = format!("SELECT {} FROM vacancies WHERE id = $1", VACANCY_COLUMNS);
        let vacancy = sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Vacancy not found".to_string()))?;

        Ok(vacancy)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateVacancyPayload) -> Result<Vacancy> {
        self.get_by_id(id).await?;

        let query = format!(
            r#"UPDATE vacancies
               SET
                   channel = COALESCE($2, channel),
                   text = COALESCE($3, text),
                   url = COALESCE($4, url),
                   "position" = COALESCE($5, "position"),
                   employment_type = COALESCE($6, employment_type),
                   salary = COALESCE($7, salary),
                   sphere = COALESCE($8, sphere),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {}"#,
            VACANCY_COLUMNS
        );

        let vacancy = sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .bind(payload.channel)
            .bind(payload.text)
            .bind(payload.url)
            .bind(payload.position)
            .bind(payload.employment_type)
            .bind(payload.salary)
            .bind(payload.sphere)
            .fetch_one(&self.pool)
            .await?;

        Ok(vacancy)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Vacancy not found".to_string()));
        }
        Ok(())
    }
}
