pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    ingest_service::IngestService, telegram_service::TelegramService,
    vacancy_service::VacancyService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub vacancy_service: VacancyService,
    pub telegram_service: TelegramService,
    pub ingest_service: IngestService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap();

        let telegram_service = TelegramService::new(http_client);
        let vacancy_service = VacancyService::new(pool.clone());
        let ingest_service = IngestService::new(telegram_service.clone(), vacancy_service.clone());

        Self {
            pool,
            vacancy_service,
            telegram_service,
            ingest_service,
        }
    }
}
