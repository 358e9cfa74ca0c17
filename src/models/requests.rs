use serde::{Deserialize, Serialize};

/// Request body for the search endpoint.
///
/// All three fields are independently optional and deliberately carry no
/// validation: malformed or oversized values degrade through the
/// sanitizers (stripped, trimmed, truncated, or treated as "no
/// constraint"), they are never rejected. An all-empty request is
/// answered with an empty result set without touching the database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(alias = "search_term", rename = "searchTerm", default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}
