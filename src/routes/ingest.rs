use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{dto::vacancy_dto::ParseResponse, error::Result, AppState};

#[utoipa::path(
    post,
    path = "/parse",
    responses(
        (status = 200, description = "Ingestion pass finished", body = Json<ParseResponse>),
        (status = 500, description = "Persistence failure")
    )
)]
#[axum::debug_handler]
pub async fn trigger_parse(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let vacancies = state.ingest_service.run().await?;
    Ok(Json(ParseResponse {
        success: true,
        parsed: vacancies.len(),
        vacancies,
    }))
}
