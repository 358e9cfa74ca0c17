//! Corretores API - searchable directory of local insurance brokers
//!
//! This library implements the request/response contract behind the broker
//! directory front-end: input sanitization, fixed-window rate limiting,
//! parameterized search with a keyword-to-specialty reclassification
//! fallback, and filter option discovery over PostgreSQL.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{infer_specialty, RateLimiter, SearchEngine, SearchFilters, SearchOutcome};
pub use crate::models::{Provider, SearchRequest, SearchResponse, Specialty};
