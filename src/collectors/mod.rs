// Collector module.
// Defines the transport trait for vacancy sources and the pagination loop.

pub mod headhunter;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppError;
use crate::models::posting::RawPosting;

/// Results requested per page.
pub const PER_PAGE: u32 = 100;

/// The loop stops once the page counter reaches this value, so pages
/// `0..PAGE_LIMIT` are requested.
pub const PAGE_LIMIT: u32 = 20;

/// Query parameters for one search page. Rebuilt per page, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    pub text: String,
    pub page: u32,
    pub per_page: u32,
    pub only_with_salary: bool,
}

impl SearchParams {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page: 0,
            per_page: PER_PAGE,
            only_with_salary: true,
        }
    }

    /// The same search, one page further.
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }
}

/// Trait that all vacancy sources must implement.
#[async_trait]
pub trait VacancySource: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Probe the source. Returns [`AppError::Connectivity`] when the probe
    /// answers with anything but success, [`AppError::Transport`] when the
    /// request itself fails.
    async fn connect(&self) -> Result<(), AppError>;

    /// Fetch one page of raw postings.
    async fn fetch_page(&self, params: &SearchParams) -> Result<Vec<RawPosting>, AppError>;
}

/// Probe the source, then collect every page up to [`PAGE_LIMIT`] in page order.
///
/// Requests run one at a time. Termination depends only on the page counter,
/// never on an empty page or a total-count field.
pub async fn fetch(
    source: &dyn VacancySource,
    keyword: &str,
) -> Result<Vec<RawPosting>, AppError> {
    if let Err(e) = source.connect().await {
        tracing::error!("Could not connect to '{}': {e}", source.name());
        return Err(e);
    }

    let mut params = SearchParams::new(keyword);
    let mut postings = Vec::new();

    while params.page != PAGE_LIMIT {
        let items = source.fetch_page(&params).await?;
        tracing::debug!(
            "'{}' page {} returned {} postings",
            source.name(),
            params.page,
            items.len()
        );
        postings.extend(items);
        params = params.next_page();
    }

    tracing::info!(
        "Fetched {} postings for '{keyword}' from '{}'",
        postings.len(),
        source.name()
    );
    Ok(postings)
}
