// Core logic exports
pub mod engine;
pub mod keywords;
pub mod options;
pub mod rate_limit;
pub mod sanitize;

pub use engine::{ProviderStore, SearchEngine, SearchFilters, SearchOutcome, RESULT_LIMIT};
pub use keywords::{infer_specialty, SPECIALTY_KEYWORDS};
pub use options::{collate_filter_options, FilterOptions, FilterRow};
pub use rate_limit::{RateLimiter, RATE_LIMIT_MESSAGE};
pub use sanitize::{sanitize_neighborhood, sanitize_search_term, sanitize_specialty};
