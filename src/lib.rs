//! Fetch vacancies from the hh.ru search API, normalize them, filter and rank
//! them, and keep the results in flat JSON files.

pub mod collectors;
pub mod config;
pub mod error;
pub mod interactive;
pub mod models;
pub mod pipeline;
pub mod store;

pub use error::AppError;
pub use models::vacancy::Vacancy;
