use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::vacancy::Vacancy;
use crate::utils::text_parser::extract_salary_number;
use crate::utils::time::start_of_day;

/// Query-time filter criteria. Values within one field are alternatives
/// (OR); the fields themselves combine conjunctively (AND).
///
/// `experience` is accepted for interface compatibility but no posting
/// field carries experience data, so it never narrows the result.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub types: Vec<String>,
    pub experience: Vec<String>,
    pub spheres: Vec<String>,
    pub salary_ranges: Vec<String>,
    pub freshness: Vec<String>,
}

impl FilterCriteria {
    /// Builds criteria from raw query pairs, collecting repeated keys.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut criteria = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "search" => {
                    if !value.is_empty() {
                        criteria.search = Some(value.clone());
                    }
                }
                "type" => criteria.types.push(value.clone()),
                "experience" => criteria.experience.push(value.clone()),
                "sphere" => criteria.spheres.push(value.clone()),
                "salary" => criteria.salary_ranges.push(value.clone()),
                "freshness" => criteria.freshness.push(value.clone()),
                _ => {}
            }
        }
        criteria
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_vacancies: i64,
    pub has_more: bool,
}

/// Filters a stored-record collection against the criteria. The input is
/// expected to be sorted by `created_at` descending already; filtering
/// preserves that order. `now` anchors the freshness buckets.
pub fn apply_filters(
    postings: &[Vacancy],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<Vacancy> {
    let search = criteria.search.as_ref().map(|s| s.to_lowercase());

    postings
        .iter()
        .filter(|vacancy| {
            if let Some(needle) = &search {
                let hit = vacancy.text.to_lowercase().contains(needle)
                    || vacancy
                        .position
                        .as_ref()
                        .is_some_and(|p| p.to_lowercase().contains(needle))
                    || vacancy
                        .sphere
                        .as_ref()
                        .is_some_and(|s| s.to_lowercase().contains(needle));
                if !hit {
                    return false;
                }
            }

            if !criteria.types.is_empty()
                && !member_of(vacancy.employment_type.as_deref(), &criteria.types)
            {
                return false;
            }

            if !criteria.spheres.is_empty()
                && !member_of(vacancy.sphere.as_deref(), &criteria.spheres)
            {
                return false;
            }

            if !criteria.freshness.is_empty()
                && !matches_freshness(vacancy.created_at, &criteria.freshness, now)
            {
                return false;
            }

            if !criteria.salary_ranges.is_empty() {
                // Postings without an extractable number are dropped when
                // any salary filter is active.
                let Some(value) = vacancy.salary.as_deref().and_then(extract_salary_number)
                else {
                    return false;
                };
                if !criteria
                    .salary_ranges
                    .iter()
                    .any(|range| matches_salary_range(value, range))
                {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect()
}

/// Slices an already-filtered, already-sorted set and computes the
/// pagination envelope.
pub fn paginate(matches: Vec<Vacancy>, page: i64, limit: i64) -> (Vec<Vacancy>, Pagination) {
    let total = matches.len() as i64;
    // Page numbers come straight off the query string; saturate instead
    // of trusting them to stay within i64 when multiplied out.
    let offset = page.saturating_sub(1).saturating_mul(limit);

    let items: Vec<Vacancy> = matches
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect();

    let total_pages = if limit > 0 {
        (total + limit - 1) / limit
    } else {
        0
    };

    let pagination = Pagination {
        current_page: page,
        total_pages,
        total_vacancies: total,
        has_more: page.saturating_mul(limit) < total,
    };

    (items, pagination)
}

fn member_of(value: Option<&str>, requested: &[String]) -> bool {
    match value {
        Some(value) => requested.iter().any(|r| r == value),
        None => false,
    }
}

/// A posting passes if its creation time falls within ANY requested
/// bucket. Unknown bucket names match nothing.
fn matches_freshness(created_at: DateTime<Utc>, buckets: &[String], now: DateTime<Utc>) -> bool {
    buckets.iter().any(|bucket| {
        let since = match bucket.as_str() {
            "today" => start_of_day(now),
            "3days" => now - Duration::days(3),
            "week" => now - Duration::days(7),
            _ => return false,
        };
        created_at >= since
    })
}

/// Ranges come as "min-max" or "min+"/"min" (open-ended). Bounds are
/// inclusive; malformed ranges match nothing.
fn matches_salary_range(value: i64, range: &str) -> bool {
    match range.split_once('-') {
        Some((min, max)) => match (min.trim().parse::<i64>(), max.trim().parse::<i64>()) {
            (Ok(min), Ok(max)) => value >= min && value <= max,
            (Ok(min), Err(_)) => value >= min,
            _ => false,
        },
        None => range
            .trim()
            .trim_end_matches('+')
            .parse::<i64>()
            .map(|min| value >= min)
            .unwrap_or(false),
    }
}
