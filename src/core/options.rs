use crate::models::Specialty;
use std::collections::HashSet;

/// One row of raw filter data as fetched from the provider table.
#[derive(Debug, Clone)]
pub struct FilterRow {
    pub specialties: Option<Vec<String>>,
    pub neighborhood: Option<String>,
}

/// Distinct filter values currently present in the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    /// First-seen order, deliberately not sorted.
    pub specialties: Vec<String>,
    /// Lexicographically sorted.
    pub neighborhoods: Vec<String>,
}

/// Collate the distinct specialties and neighborhoods from a full table
/// scan of provider rows.
///
/// Specialties are flattened and deduplicated preserving first-seen order,
/// and filtered to members of the fixed enumeration - a stray code in
/// storage must never reach a client. Neighborhoods are deduplicated and
/// sorted.
pub fn collate_filter_options(rows: &[FilterRow]) -> FilterOptions {
    let mut specialties = Vec::new();
    let mut seen_specialties = HashSet::new();
    let mut neighborhoods = Vec::new();
    let mut seen_neighborhoods = HashSet::new();

    for row in rows {
        if let Some(codes) = &row.specialties {
            for code in codes {
                if Specialty::from_code(code).is_some() && seen_specialties.insert(code.clone()) {
                    specialties.push(code.clone());
                }
            }
        }
        if let Some(neighborhood) = &row.neighborhood {
            if !neighborhood.is_empty() && seen_neighborhoods.insert(neighborhood.clone()) {
                neighborhoods.push(neighborhood.clone());
            }
        }
    }

    neighborhoods.sort();

    FilterOptions {
        specialties,
        neighborhoods,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(specialties: Option<&[&str]>, neighborhood: Option<&str>) -> FilterRow {
        FilterRow {
            specialties: specialties.map(|s| s.iter().map(|x| x.to_string()).collect()),
            neighborhood: neighborhood.map(|n| n.to_string()),
        }
    }

    #[test]
    fn test_specialties_first_seen_order() {
        let rows = vec![
            row(Some(&["vida", "auto"]), None),
            row(Some(&["auto", "saude"]), None),
        ];

        let options = collate_filter_options(&rows);
        assert_eq!(options.specialties, vec!["vida", "auto", "saude"]);
    }

    #[test]
    fn test_unknown_specialty_codes_filtered() {
        let rows = vec![row(Some(&["auto", "pet", "drone"]), None)];

        let options = collate_filter_options(&rows);
        assert_eq!(options.specialties, vec!["auto"]);
    }

    #[test]
    fn test_neighborhoods_sorted_and_deduped() {
        let rows = vec![
            row(None, Some("Meireles")),
            row(None, Some("Aldeota")),
            row(None, Some("Meireles")),
            row(None, Some("Centro")),
        ];

        let options = collate_filter_options(&rows);
        assert_eq!(options.neighborhoods, vec!["Aldeota", "Centro", "Meireles"]);
    }

    #[test]
    fn test_null_fields_skipped() {
        let rows = vec![
            row(None, None),
            row(Some(&["viagem"]), Some("")),
        ];

        let options = collate_filter_options(&rows);
        assert_eq!(options.specialties, vec!["viagem"]);
        assert!(options.neighborhoods.is_empty());
    }
}
