// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Provider, Specialty};
pub use requests::SearchRequest;
pub use responses::{ErrorResponse, FilterOptionsResponse, HealthResponse, SearchResponse};
