pub mod ingest_service;
pub mod telegram_service;
pub mod vacancy_service;
