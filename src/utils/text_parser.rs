use regex::Regex;
use std::sync::OnceLock;

/// Best-effort structured fields extracted from a raw posting text.
///
/// Absence of a match yields an absent field, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedVacancy {
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub salary: Option<String>,
    pub sphere: Option<String>,
}

/// Employment-type patterns in fixed priority order. The first pattern
/// that matches anywhere in the text wins, regardless of where it
/// appears relative to the others.
const EMPLOYMENT_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)удален[нао]", "Remote"),
    (r"(?i)офис", "Office"),
    (r"(?i)гибрид", "Hybrid"),
    (r"(?i)remote", "Remote"),
    (r"(?i)office", "Office"),
    (r"(?i)hybrid", "Hybrid"),
];

/// Salary patterns in fixed priority order, covering "salary ... N currency",
/// "от/до N currency" and "N-M currency" range forms. The full matched
/// substring is stored verbatim; capture groups are intentionally discarded
/// to preserve the surrounding currency/context text.
const SALARY_PATTERNS: &[&str] = &[
    r"(?i)(?:з/п|зарплата|salary).*?(\d+(?:\s?\d+)*(?:\s?000)?.*?(?:руб|₽|rub|доллар|\$|евро|€))",
    r"(?i)от\s+(\d+(?:\s?\d+)*(?:\s?000)?.*?(?:руб|₽|rub|доллар|\$|евро|€))",
    r"(?i)до\s+(\d+(?:\s?\d+)*(?:\s?000)?.*?(?:руб|₽|rub|доллар|\$|евро|€))",
    r"(?i)(\d+(?:\s?\d+)*(?:\s?000)?)\s*-\s*(\d+(?:\s?\d+)*(?:\s?000)?)\s*(?:руб|₽|rub)",
];

/// Hashtag keyword to sphere category. Looked up case-insensitively against
/// each hashtag in text order; the first hashtag with a mapping wins.
const HASHTAG_SPHERES: &[(&str, &str)] = &[
    ("копирайтер", "Copywriting"),
    ("копирайтинг", "Copywriting"),
    ("редактор", "Copywriting"),
    ("дизайн", "Design"),
    ("дизайнер", "Design"),
    ("маркетинг", "Marketing"),
    ("маркетолог", "Marketing"),
    ("смм", "SMM"),
    ("it", "IT"),
    ("программист", "IT"),
    ("разработчик", "IT"),
    ("менеджер", "Management"),
    ("менеджмент", "Management"),
    ("hr", "HR"),
    ("продажи", "Sales"),
    ("финансы", "Finance"),
    ("реклама", "Advertising & PR"),
    ("pr", "Advertising & PR"),
    ("креатив", "Creative"),
    ("поддержка", "Customer Support"),
    ("сервис", "Customer Support"),
];

/// Fallback table scanned against the extracted position when no hashtag
/// mapped. First substring hit wins.
const POSITION_SPHERES: &[(&str, &str)] = &[
    ("копирайтер", "Copywriting"),
    ("редактор", "Copywriting"),
    ("дизайнер", "Design"),
    ("маркетолог", "Marketing"),
    ("смм", "SMM"),
    ("программист", "IT"),
    ("разработчик", "IT"),
    ("менеджер", "Management"),
    ("hr", "HR"),
    ("продажи", "Sales"),
    ("финансы", "Finance"),
];

fn position_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("position pattern"))
}

fn employment_patterns() -> &'static Vec<(Regex, &'static str)> {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        EMPLOYMENT_PATTERNS
            .iter()
            .map(|(pattern, label)| (Regex::new(pattern).expect("employment pattern"), *label))
            .collect()
    })
}

fn salary_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        SALARY_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("salary pattern"))
            .collect()
    })
}

fn hashtag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#([a-zA-Zа-яА-Я]+)").expect("hashtag pattern"))
}

fn any_hashtag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#\w+").expect("any-hashtag pattern"))
}

/// Extracts best-effort structured fields from a raw posting text.
///
/// Pure function, no side effects. Ordered-first-match semantics
/// throughout: when several patterns could apply, the earliest pattern
/// in the fixed list decides.
pub fn parse_vacancy_text(text: &str) -> ParsedVacancy {
    let mut parsed = ParsedVacancy::default();

    // Position: first bold-delimited span, trimmed.
    if let Some(caps) = position_pattern().captures(text) {
        parsed.position = Some(caps[1].trim().to_string());
    }

    for (pattern, label) in employment_patterns() {
        if pattern.is_match(text) {
            parsed.employment_type = Some((*label).to_string());
            break;
        }
    }

    for pattern in salary_patterns() {
        if let Some(matched) = pattern.find(text) {
            parsed.salary = Some(matched.as_str().trim().to_string());
            break;
        }
    }

    for caps in hashtag_pattern().captures_iter(text) {
        let tag = caps[1].to_lowercase();
        if let Some((_, sphere)) = HASHTAG_SPHERES.iter().find(|(keyword, _)| *keyword == tag) {
            parsed.sphere = Some((*sphere).to_string());
            break;
        }
    }

    if parsed.sphere.is_none() {
        if let Some(position) = &parsed.position {
            let position_lower = position.to_lowercase();
            if let Some((_, sphere)) = POSITION_SPHERES
                .iter()
                .find(|(keyword, _)| position_lower.contains(keyword))
            {
                parsed.sphere = Some((*sphere).to_string());
            }
        }
    }

    parsed
}

/// If there are hashtags, the message is probably a posting.
pub fn has_hashtags(text: &str) -> bool {
    any_hashtag_pattern().is_match(text)
}

/// Pulls a representative numeric value out of a salary text: the first
/// run of digits (single spaces inside a group allowed, e.g. "50 000"),
/// normalized to thousands when it reads like a raw amount, so that it
/// compares against the thousands-denominated filter ranges.
pub fn extract_salary_number(salary: &str) -> Option<i64> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let number = PATTERN.get_or_init(|| Regex::new(r"\d+(?:\s\d+)*").expect("number pattern"));

    let matched = number.find(salary)?;
    let digits: String = matched
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    let value: i64 = digits.parse().ok()?;
    Some(if value >= 1000 { value / 1000 } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_first_bold_span() {
        let parsed = parse_vacancy_text("**  Senior Designer ** ищет команда\n**другое**");
        assert_eq!(parsed.position.as_deref(), Some("Senior Designer"));
    }

    #[test]
    fn test_position_absent_without_bold_span() {
        let parsed = parse_vacancy_text("ищем дизайнера, пишите в личку");
        assert_eq!(parsed.position, None);
    }

    #[test]
    fn test_employment_type_absent_when_no_pattern_matches() {
        let parsed = parse_vacancy_text("**Дизайнер** в студию");
        assert_eq!(parsed.employment_type, None);
    }

    #[test]
    fn test_employment_type_priority_on_multiple_matches() {
        // "офис" appears first in the text, but "удаленно" is earlier in
        // the priority list and must win.
        let parsed = parse_vacancy_text("работа в офисе или удаленно");
        assert_eq!(parsed.employment_type.as_deref(), Some("Remote"));
    }

    #[test]
    fn test_employment_type_english_patterns() {
        let parsed = parse_vacancy_text("fully remote position");
        assert_eq!(parsed.employment_type.as_deref(), Some("Remote"));
        let parsed = parse_vacancy_text("Hybrid schedule, 2 days in office");
        // "office" and "hybrid" both match; "office" is earlier in the list.
        assert_eq!(parsed.employment_type.as_deref(), Some("Office"));
    }

    #[test]
    fn test_salary_stores_full_matched_substring() {
        let parsed = parse_vacancy_text("Зарплата от 100 000 руб на руки");
        assert_eq!(parsed.salary.as_deref(), Some("Зарплата от 100 000 руб"));
    }

    #[test]
    fn test_salary_range_form() {
        let parsed = parse_vacancy_text("платим 120000-150000 руб в месяц");
        assert_eq!(parsed.salary.as_deref(), Some("120000-150000 руб"));
    }

    #[test]
    fn test_salary_absent_without_currency() {
        let parsed = parse_vacancy_text("оплата достойная, обсудим");
        assert_eq!(parsed.salary, None);
    }

    #[test]
    fn test_sphere_from_hashtag() {
        let parsed = parse_vacancy_text("нужен спец #вакансия #дизайн #удаленка");
        assert_eq!(parsed.sphere.as_deref(), Some("Design"));
    }

    #[test]
    fn test_sphere_first_mapped_hashtag_wins() {
        let parsed = parse_vacancy_text("#маркетинг #дизайн");
        assert_eq!(parsed.sphere.as_deref(), Some("Marketing"));
    }

    #[test]
    fn test_sphere_falls_back_to_position() {
        let parsed = parse_vacancy_text("**Разработчик на проект** детали в лс #вакансия");
        assert_eq!(parsed.sphere.as_deref(), Some("IT"));
    }

    #[test]
    fn test_sphere_absent_when_nothing_maps() {
        let parsed = parse_vacancy_text("**Курьер** нужен срочно #вакансия");
        assert_eq!(parsed.sphere, None);
    }

    #[test]
    fn test_has_hashtags() {
        assert!(has_hashtags("текст #вакансия"));
        assert!(!has_hashtags("текст без тегов"));
    }

    #[test]
    fn test_extract_salary_number_normalizes_to_thousands() {
        assert_eq!(extract_salary_number("от 50000 руб"), Some(50));
        assert_eq!(extract_salary_number("120000-150000 руб"), Some(120));
        assert_eq!(extract_salary_number("от 100 000 руб"), Some(100));
        assert_eq!(extract_salary_number("150$ в день"), Some(150));
        assert_eq!(extract_salary_number("по договоренности"), None);
    }
}
