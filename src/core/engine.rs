use crate::core::keywords::infer_specialty;
use crate::core::options::{FilterOptions, FilterRow};
use crate::core::sanitize::{sanitize_neighborhood, sanitize_search_term, sanitize_specialty};
use crate::models::{Provider, Specialty};
use async_trait::async_trait;

/// Hard cap on rows returned by any provider query.
pub const RESULT_LIMIT: usize = 50;

/// Sanitized filters handed to the datastore.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    /// Case-insensitive substring matched against name, email, address
    /// and neighborhood ("OR" across fields). Empty means no constraint.
    pub term: String,
    /// Specialty-set containment constraint.
    pub specialty: Option<Specialty>,
    /// Exact neighborhood equality constraint.
    pub neighborhood: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.specialty.is_none() && self.neighborhood.is_none()
    }
}

/// Read access to the provider collection.
///
/// The engine only ever reads; every query is name-ascending and capped at
/// [`RESULT_LIMIT`] rows. Implemented by the Postgres client in production
/// and by in-memory stores in tests.
#[async_trait]
pub trait ProviderStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Providers matching the combined filters.
    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Provider>, Self::Error>;

    /// Providers listed under a single specialty, ignoring all other filters.
    async fn by_specialty(&self, specialty: Specialty) -> Result<Vec<Provider>, Self::Error>;

    /// Raw specialty/neighborhood pairs for the whole collection.
    async fn filter_rows(&self) -> Result<Vec<FilterRow>, Self::Error>;
}

/// Search result page. `count` always equals `data.len()`.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub data: Vec<Provider>,
    pub count: usize,
    /// Set when the keyword fallback replaced the text-match results.
    pub reclassified_as: Option<Specialty>,
}

impl SearchOutcome {
    fn from_records(data: Vec<Provider>, reclassified_as: Option<Specialty>) -> Self {
        let count = data.len();
        Self {
            data,
            count,
            reclassified_as,
        }
    }
}

/// Orchestrates sanitization, the filtered query and the keyword
/// reclassification fallback.
///
/// # Pipeline
/// 1. Sanitize the three raw inputs.
/// 2. All empty: short-circuit to an empty page without touching the store.
/// 3. Run the combined filtered query.
/// 4. If a term was given without an explicit specialty, try to infer one
///    from the keyword table; on a hit, re-run as a specialty-only query
///    and, if that yields anything, replace the result set with it.
///
/// Step 4 fires at most once and can discard a valid text match in favor
/// of a broader category match. That precedence is intentional and must
/// not be changed without product sign-off.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine;

impl SearchEngine {
    pub fn new() -> Self {
        Self
    }

    /// Build sanitized filters from raw request fields.
    pub fn sanitize(
        &self,
        raw_term: Option<&str>,
        raw_specialty: Option<&str>,
        raw_region: Option<&str>,
    ) -> SearchFilters {
        SearchFilters {
            term: sanitize_search_term(raw_term),
            specialty: sanitize_specialty(raw_specialty),
            neighborhood: sanitize_neighborhood(raw_region),
        }
    }

    /// Run a full search against the store.
    pub async fn search<S: ProviderStore>(
        &self,
        store: &S,
        raw_term: Option<&str>,
        raw_specialty: Option<&str>,
        raw_region: Option<&str>,
    ) -> Result<SearchOutcome, S::Error> {
        let filters = self.sanitize(raw_term, raw_specialty, raw_region);

        if filters.is_empty() {
            return Ok(SearchOutcome::from_records(vec![], None));
        }

        let records = store.search(&filters).await?;

        // Keyword fallback: only when a term was supplied and the client
        // did not pin a specialty explicitly.
        if !filters.term.is_empty() && filters.specialty.is_none() {
            if let Some(implied) = infer_specialty(&filters.term) {
                tracing::debug!(
                    "Term {:?} implies specialty {}, re-running as category query",
                    filters.term,
                    implied
                );
                let by_specialty = store.by_specialty(implied).await?;
                if !by_specialty.is_empty() {
                    return Ok(SearchOutcome::from_records(by_specialty, Some(implied)));
                }
            }
        }

        Ok(SearchOutcome::from_records(records, None))
    }

    /// Distinct filter values for the whole dataset.
    pub async fn filter_options<S: ProviderStore>(
        &self,
        store: &S,
    ) -> Result<FilterOptions, S::Error> {
        let rows = store.filter_rows().await?;
        Ok(crate::core::options::collate_filter_options(&rows))
    }
}
