use serde::{Deserialize, Serialize};

/// Specialty categories a broker can be listed under.
///
/// This is a closed enumeration: unknown codes are never persisted and
/// never surfaced by filter discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialty {
    Auto,
    Vida,
    Residencial,
    Empresarial,
    Saude,
    Viagem,
}

impl Specialty {
    /// All specialties, in canonical order.
    pub const ALL: [Specialty; 6] = [
        Specialty::Auto,
        Specialty::Vida,
        Specialty::Residencial,
        Specialty::Empresarial,
        Specialty::Saude,
        Specialty::Viagem,
    ];

    /// Parse a wire/storage code into a specialty.
    ///
    /// Returns None for anything outside the enumeration (no normalization,
    /// no case folding - codes are stored lowercase and matched exactly).
    pub fn from_code(code: &str) -> Option<Specialty> {
        match code {
            "auto" => Some(Specialty::Auto),
            "vida" => Some(Specialty::Vida),
            "residencial" => Some(Specialty::Residencial),
            "empresarial" => Some(Specialty::Empresarial),
            "saude" => Some(Specialty::Saude),
            "viagem" => Some(Specialty::Viagem),
            _ => None,
        }
    }

    /// The wire/storage code for this specialty.
    pub fn as_code(&self) -> &'static str {
        match self {
            Specialty::Auto => "auto",
            Specialty::Vida => "vida",
            Specialty::Residencial => "residencial",
            Specialty::Empresarial => "empresarial",
            Specialty::Saude => "saude",
            Specialty::Viagem => "viagem",
        }
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// A broker directory entry.
///
/// Records are created and maintained by an external ingestion process;
/// this service only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub website: Option<String>,
    pub address: String,
    #[serde(default)]
    pub neighborhood: Option<String>,
    pub city: String,
    pub state: String,
    pub specialties: Vec<String>,
    pub rating: f64,
    pub review_count: i32,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl Provider {
    /// Whether this provider is listed under the given specialty.
    pub fn has_specialty(&self, specialty: Specialty) -> bool {
        self.specialties.iter().any(|s| s == specialty.as_code())
    }
}
