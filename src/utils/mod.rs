pub mod text_parser;
pub mod time;
pub mod vacancy_filter;
