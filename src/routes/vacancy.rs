use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::vacancy_dto::{EditResponse, UpdateVacancyPayload, VacancyListResponse},
    error::Result,
    utils::vacancy_filter::FilterCriteria,
    AppState,
};

fn query_i64(pairs: &[(String, String)], key: &str, default: i64) -> i64 {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(default)
}

#[utoipa::path(
    get,
    path = "/",
    params(
        ("page" = Option<i64>, Query, description = "Page number, 1-based"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Substring search over text, position and sphere"),
        ("type" = Option<Vec<String>>, Query, description = "Employment type filter, repeatable"),
        ("experience" = Option<Vec<String>>, Query, description = "Accepted for compatibility, repeatable"),
        ("sphere" = Option<Vec<String>>, Query, description = "Sphere filter, repeatable"),
        ("salary" = Option<Vec<String>>, Query, description = "Salary range filter (min-max or min+), repeatable"),
        ("freshness" = Option<Vec<String>>, Query, description = "Recency bucket (today/3days/week), repeatable")
    ),
    responses(
        (status = 200, description = "Filtered, paginated vacancies", body = Json<VacancyListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_vacancies(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse> {
    let page = query_i64(&params, "page", 1);
    let limit = query_i64(&params, "limit", 20);
    let criteria = FilterCriteria::from_pairs(&params);

    let (vacancies, pagination) = state.vacancy_service.list(&criteria, page, limit).await?;
    Ok(Json(VacancyListResponse {
        vacancies,
        pagination,
    }))
}

#[utoipa::path(
    put,
    path = "/edit/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = UpdateVacancyPayload,
    responses(
        (status = 200, description = "Vacancy updated", body = Json<EditResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVacancyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let vacancy = state.vacancy_service.update(id, payload).await?;
    Ok(Json(EditResponse {
        success: true,
        vacancy,
    }))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy deleted"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.vacancy_service.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}
