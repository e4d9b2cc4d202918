//! End-to-end coverage of the extraction and query-filter pipeline,
//! exercised in memory: raw message text -> parsed fields -> stored
//! record shape -> filter stages -> pagination envelope.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use vacancy_backend::models::vacancy::Vacancy;
use vacancy_backend::services::ingest_service::looks_like_posting;
use vacancy_backend::utils::text_parser::parse_vacancy_text;
use vacancy_backend::utils::vacancy_filter::{apply_filters, paginate, FilterCriteria};

fn ingest(channel: &str, message_id: i64, text: &str, created_at: DateTime<Utc>) -> Vacancy {
    let parsed = parse_vacancy_text(text);
    Vacancy {
        id: Uuid::new_v4(),
        channel: channel.to_string(),
        text: text.to_string(),
        url: format!("https://t.me/{}/{}", channel.trim_start_matches('@'), message_id),
        position: parsed.position,
        employment_type: parsed.employment_type,
        salary: parsed.salary,
        sphere: parsed.sphere,
        created_at,
        updated_at: created_at,
    }
}

const DESIGNER_POST: &str = "**Продуктовый дизайнер / Product Designer**\n\
    Ищем в команду, работа удаленно, зарплата 120000-150000 руб.\n\
    Портфолио обязательно. #дизайн #вакансия";

const EDITOR_POST: &str = "**Редактор рассылок**\n\
    Работа в офисе, з/п от 50000 руб, график 5/2.\n\
    Писать в личные сообщения. #копирайтинг";

#[test]
fn test_message_passes_posting_heuristic() {
    assert!(looks_like_posting(DESIGNER_POST));
    assert!(looks_like_posting(EDITOR_POST));
    assert!(!looks_like_posting("short #tag"));
}

#[test]
fn test_extraction_fills_all_fields() {
    let now = Utc::now();
    let vacancy = ingest("@comeindesign", 42, DESIGNER_POST, now);

    assert_eq!(
        vacancy.position.as_deref(),
        Some("Продуктовый дизайнер / Product Designer")
    );
    assert_eq!(vacancy.employment_type.as_deref(), Some("Remote"));
    assert_eq!(vacancy.salary.as_deref(), Some("зарплата 120000-150000 руб"));
    assert_eq!(vacancy.sphere.as_deref(), Some("Design"));
    assert_eq!(vacancy.url, "https://t.me/comeindesign/42");
}

#[test]
fn test_unfiltered_query_returns_posting_verbatim() {
    let now = Utc::now();
    let stored = vec![ingest("@work_editor", 7, EDITOR_POST, now)];

    let matched = apply_filters(&stored, &FilterCriteria::default(), now);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].text, EDITOR_POST);
    assert_eq!(matched[0].url, stored[0].url);
    assert_eq!(matched[0].position, stored[0].position);
    assert_eq!(matched[0].salary, stored[0].salary);
}

#[test]
fn test_salary_range_scenario() {
    // "from 50000 rub" vs "120000-150000 rub" with range "100-200"
    // (thousands-denominated) must keep only the second.
    let now = Utc::now();
    let stored = vec![
        ingest("@work_editor", 1, EDITOR_POST, now),
        ingest("@comeindesign", 2, DESIGNER_POST, now),
    ];

    let criteria = FilterCriteria {
        salary_ranges: vec!["100-200".to_string()],
        ..Default::default()
    };
    let matched = apply_filters(&stored, &criteria, now);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].sphere.as_deref(), Some("Design"));
}

#[test]
fn test_combined_search_type_freshness_scenario() {
    let now = Utc::now();
    let stored = vec![
        ingest("@comeindesign", 1, DESIGNER_POST, now),
        ingest("@work_editor", 2, EDITOR_POST, now),
        // Same designer text but created well before today's midnight.
        ingest("@comeindesign", 3, DESIGNER_POST, now - Duration::days(2)),
    ];

    let criteria = FilterCriteria {
        search: Some("designer".to_string()),
        types: vec!["Remote".to_string()],
        freshness: vec!["today".to_string()],
        ..Default::default()
    };
    let matched = apply_filters(&stored, &criteria, now);

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].url, "https://t.me/comeindesign/1");
    assert_eq!(matched[0].employment_type.as_deref(), Some("Remote"));
}

#[test]
fn test_pagination_invariants_over_filtered_set() {
    let now = Utc::now();
    let stored: Vec<Vacancy> = (0..7)
        .map(|i| ingest("@comeindesign", i, DESIGNER_POST, now - Duration::minutes(i)))
        .collect();

    for (page, limit) in [(1, 3), (2, 3), (3, 3), (1, 7), (2, 7), (1, 100)] {
        let matched = apply_filters(&stored, &FilterCriteria::default(), now);
        let total = matched.len() as i64;
        let (items, pagination) = paginate(matched, page, limit);

        assert!(items.len() as i64 <= limit);
        assert_eq!(pagination.total_vacancies, total);
        assert_eq!(pagination.total_pages, (total + limit - 1) / limit);
        assert_eq!(pagination.has_more, page * limit < total);
    }
}

#[test]
fn test_results_stay_newest_first_across_pages() {
    let now = Utc::now();
    let stored: Vec<Vacancy> = (0..6)
        .map(|i| ingest("@comeindesign", i, DESIGNER_POST, now - Duration::minutes(i)))
        .collect();

    let matched = apply_filters(&stored, &FilterCriteria::default(), now);
    let (page_one, _) = paginate(matched.clone(), 1, 3);
    let (page_two, _) = paginate(matched, 2, 3);

    let mut seen: Vec<DateTime<Utc>> = page_one
        .iter()
        .chain(page_two.iter())
        .map(|v| v.created_at)
        .collect();
    let mut sorted = seen.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(seen, sorted);
    seen.dedup();
    assert_eq!(seen.len(), 6);
}
