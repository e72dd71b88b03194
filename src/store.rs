//! Flat-file persistence of vacancies as a JSON array.
//!
//! Every write replaces the whole file. There is no locking, so a store file
//! must only have one writer at a time.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::AppError;
use crate::models::vacancy::Vacancy;

/// Outcome of an [`VacancyStore::upsert_all`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertSummary {
    pub received: usize,
    pub added: usize,
    pub total: usize,
}

/// Storage boundary for normalized vacancies, keyed by `alternate_url`.
pub trait VacancyStore {
    /// Stored vacancies, or `None` when there is no readable data yet.
    fn read_all(&self) -> Option<Vec<Vacancy>>;

    /// Append vacancies whose URL is not stored yet. Existing entries are
    /// never replaced.
    fn upsert_all(&self, vacancies: &[Vacancy]) -> Result<UpsertSummary, AppError>;

    /// Remove every entry with `url`. Returns `None` without writing when
    /// there is no readable data, otherwise the number of removed entries.
    fn delete_by_key(&self, url: &str) -> Result<Option<usize>, AppError>;
}

/// A [`VacancyStore`] backed by one pretty-printed JSON file.
///
/// Entries are kept as raw JSON between read and write, so entries this
/// crate cannot type (older files, hand edits) survive every rewrite.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored array, or `None` if the file is missing, empty, not JSON,
    /// or not a JSON array.
    fn read_entries(&self) -> Option<Vec<Value>> {
        let body = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("No data in {}: {e}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str(&body) {
            Ok(Value::Array(entries)) => Some(entries),
            Ok(_) => {
                tracing::warn!("{} does not hold a JSON array", self.path.display());
                None
            }
            Err(e) => {
                tracing::warn!("{} is empty or corrupt: {e}", self.path.display());
                None
            }
        }
    }

    fn write(&self, entries: &[Value]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

fn entry_url(entry: &Value) -> Option<&str> {
    entry.get("alternate_url").and_then(|u| u.as_str())
}

impl VacancyStore for JsonFileStore {
    fn read_all(&self) -> Option<Vec<Vacancy>> {
        let entries = self.read_entries()?;
        let vacancies: Vec<Vacancy> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(vacancy) => Some(vacancy),
                Err(e) => {
                    tracing::warn!("Skipping malformed entry in {}: {e}", self.path.display());
                    None
                }
            })
            .collect();
        Some(vacancies)
    }

    fn upsert_all(&self, vacancies: &[Vacancy]) -> Result<UpsertSummary, AppError> {
        let mut stored = self.read_entries().unwrap_or_default();
        let mut seen: HashSet<String> = stored
            .iter()
            .filter_map(entry_url)
            .map(str::to_string)
            .collect();

        let mut added = 0;
        for vacancy in vacancies {
            if seen.insert(vacancy.alternate_url.clone()) {
                stored.push(serde_json::to_value(vacancy)?);
                added += 1;
            }
        }

        self.write(&stored)?;
        tracing::info!(
            "Saved {} vacancies to {}: {added} new, {} total",
            vacancies.len(),
            self.path.display(),
            stored.len()
        );

        Ok(UpsertSummary {
            received: vacancies.len(),
            added,
            total: stored.len(),
        })
    }

    fn delete_by_key(&self, url: &str) -> Result<Option<usize>, AppError> {
        let Some(mut stored) = self.read_entries() else {
            tracing::warn!("Nothing to delete from {}", self.path.display());
            return Ok(None);
        };

        let before = stored.len();
        stored.retain(|entry| entry_url(entry) != Some(url));
        let removed = before - stored.len();

        self.write(&stored)?;
        tracing::info!("Removed {removed} entries for {url} from {}", self.path.display());
        Ok(Some(removed))
    }
}
