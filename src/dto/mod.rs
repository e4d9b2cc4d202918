pub mod vacancy_dto;
