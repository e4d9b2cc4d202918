use tracing::{error, info};

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::models::vacancy::{NewVacancy, Vacancy};
use crate::services::telegram_service::TelegramService;
use crate::services::vacancy_service::VacancyService;
use crate::utils::text_parser::{has_hashtags, parse_vacancy_text};

/// Drives the scrape -> extract -> dedup -> persist pipeline over the
/// configured channel set. Used by both the manual HTTP trigger and the
/// hourly scheduled job.
#[derive(Clone)]
pub struct IngestService {
    telegram: TelegramService,
    vacancies: VacancyService,
}

impl IngestService {
    pub fn new(telegram: TelegramService, vacancies: VacancyService) -> Self {
        Self {
            telegram,
            vacancies,
        }
    }

    /// Ingests every configured channel in order. A failing channel is
    /// logged and skipped so the others still run; persistence errors are
    /// not per-channel and abort the pass.
    pub async fn run(&self) -> Result<Vec<Vacancy>> {
        let config = get_config();
        let mut inserted = Vec::new();

        for channel in &config.telegram_channels {
            match self.ingest_channel(channel).await {
                Ok(mut from_channel) => {
                    info!(channel, parsed = from_channel.len(), "channel ingested");
                    inserted.append(&mut from_channel);
                }
                Err(err @ Error::Database(_)) => return Err(err),
                Err(err) => {
                    error!(channel, error = ?err, "failed to ingest channel");
                }
            }
        }

        Ok(inserted)
    }

    /// Processes one channel's recent messages in the order the source
    /// returns them (newest first). Returns only the postings that were
    /// actually new.
    async fn ingest_channel(&self, channel: &str) -> Result<Vec<Vacancy>> {
        let limit = get_config().fetch_limit;
        let messages = self.telegram.fetch_messages(channel, limit).await?;

        let mut inserted = Vec::new();
        for message in messages {
            if !looks_like_posting(&message.text) {
                continue;
            }

            let parsed = parse_vacancy_text(&message.text);
            let candidate = NewVacancy {
                channel: channel.to_string(),
                url: self.telegram.message_url(channel, message.id),
                text: message.text,
                position: parsed.position,
                employment_type: parsed.employment_type,
                salary: parsed.salary,
                sphere: parsed.sphere,
            };

            if let Some(vacancy) = self.vacancies.insert_if_new(&candidate).await? {
                inserted.push(vacancy);
            }
        }

        Ok(inserted)
    }
}

/// Heuristic for "looks like a job posting": long enough to carry real
/// content (counted in characters, not bytes) and tagged with at least
/// one hashtag.
pub fn looks_like_posting(text: &str) -> bool {
    text.chars().count() > 50 && has_hashtags(text)
}
