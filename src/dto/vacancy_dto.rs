use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vacancy::Vacancy;
use crate::utils::vacancy_filter::Pagination;

/// Partial update: any omitted field keeps its stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVacancyPayload {
    #[validate(length(min = 1))]
    pub channel: Option<String>,
    #[validate(length(min = 1))]
    pub text: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub salary: Option<String>,
    pub sphere: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VacancyListResponse {
    pub vacancies: Vec<Vacancy>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseResponse {
    pub success: bool,
    pub parsed: usize,
    pub vacancies: Vec<Vacancy>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditResponse {
    pub success: bool,
    pub vacancy: Vacancy,
}
