use crate::core::engine::{ProviderStore, SearchFilters, RESULT_LIMIT};
use crate::core::options::FilterRow;
use crate::models::{Provider, Specialty};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Query timed out")]
    Timeout,
}

impl PostgresError {
    /// Whether this failure was the bounded query timeout rather than a
    /// database-side error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PostgresError::Timeout)
    }
}

const PROVIDER_COLUMNS: &str = "id, name, email, phone, website, address, neighborhood, \
     city, state, specialties, rating, review_count, verified, description";

/// PostgreSQL client for the provider directory.
///
/// All access is read-only single-statement queries; filters are always
/// bound parameters, never interpolated text. Every round-trip runs under
/// a bounded timeout so a hung database cannot hang a request.
pub struct PostgresClient {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        query_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            pool,
            query_timeout,
        })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(settings: &crate::config::DatabaseSettings) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(10),
            settings.min_connections.unwrap_or(1),
            settings.acquire_timeout(),
            Duration::from_secs(settings.query_timeout_secs),
        )
        .await
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, PostgresError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(PostgresError::Timeout),
        }
    }

    /// Providers matching the sanitized filters, name-ascending, capped.
    pub async fn search_providers(
        &self,
        filters: &SearchFilters,
    ) -> Result<Vec<Provider>, PostgresError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM providers WHERE TRUE",
            PROVIDER_COLUMNS
        ));

        if !filters.term.is_empty() {
            let pattern = format!("%{}%", filters.term);
            query
                .push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR address ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR neighborhood ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(specialty) = filters.specialty {
            query
                .push(" AND ")
                .push_bind(specialty.as_code())
                .push(" = ANY(specialties)");
        }

        if let Some(neighborhood) = &filters.neighborhood {
            query
                .push(" AND neighborhood = ")
                .push_bind(neighborhood.clone());
        }

        query
            .push(" ORDER BY name ASC LIMIT ")
            .push_bind(RESULT_LIMIT as i64);

        let rows = self.bounded(query.build().fetch_all(&self.pool)).await?;

        rows.iter().map(map_provider).collect()
    }

    /// Providers listed under one specialty, ignoring all other filters.
    pub async fn providers_by_specialty(
        &self,
        specialty: Specialty,
    ) -> Result<Vec<Provider>, PostgresError> {
        let sql = format!(
            "SELECT {} FROM providers WHERE $1 = ANY(specialties) ORDER BY name ASC LIMIT $2",
            PROVIDER_COLUMNS
        );

        let rows = self
            .bounded(
                sqlx::query(&sql)
                    .bind(specialty.as_code())
                    .bind(RESULT_LIMIT as i64)
                    .fetch_all(&self.pool),
            )
            .await?;

        rows.iter().map(map_provider).collect()
    }

    /// Full-table scan of the raw filter columns. Acceptable while the
    /// dataset stays small; revisit before it grows past a few thousand
    /// rows.
    pub async fn fetch_filter_rows(&self) -> Result<Vec<FilterRow>, PostgresError> {
        let rows = self
            .bounded(
                sqlx::query("SELECT specialties, neighborhood FROM providers")
                    .fetch_all(&self.pool),
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(FilterRow {
                    specialties: row.try_get("specialties")?,
                    neighborhood: row.try_get("neighborhood")?,
                })
            })
            .collect()
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        self.bounded(sqlx::query("SELECT 1").fetch_one(&self.pool))
            .await
            .map(|_| true)
    }
}

fn map_provider(row: &PgRow) -> Result<Provider, PostgresError> {
    Ok(Provider {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        website: row.try_get("website")?,
        address: row.try_get("address")?,
        neighborhood: row.try_get("neighborhood")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        specialties: row.try_get("specialties")?,
        rating: row.try_get("rating")?,
        review_count: row.try_get("review_count")?,
        verified: row.try_get("verified")?,
        description: row.try_get("description")?,
    })
}

#[async_trait]
impl ProviderStore for PostgresClient {
    type Error = PostgresError;

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Provider>, PostgresError> {
        self.search_providers(filters).await
    }

    async fn by_specialty(&self, specialty: Specialty) -> Result<Vec<Provider>, PostgresError> {
        self.providers_by_specialty(specialty).await
    }

    async fn filter_rows(&self) -> Result<Vec<FilterRow>, PostgresError> {
        self.fetch_filter_rows().await
    }
}
