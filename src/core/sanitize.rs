use crate::models::Specialty;

/// Maximum length of a sanitized search term.
pub const MAX_TERM_LEN: usize = 100;

/// Maximum length of a sanitized neighborhood name.
pub const MAX_NEIGHBORHOOD_LEN: usize = 50;

/// Characters stripped from free-text inputs before they reach the query
/// layer. Secondary defense only - every query binds its values, so this
/// exists to close markup/pattern break-out on anything that echoes the
/// input back.
const STRIPPED: [char; 10] = ['<', '>', '"', '\'', '%', ';', '(', ')', '&', '+'];

fn strip_and_trim(input: &str) -> String {
    let stripped: String = input.chars().filter(|c| !STRIPPED.contains(c)).collect();
    stripped.trim().to_string()
}

fn truncate_chars(input: String, max: usize) -> String {
    if input.chars().count() <= max {
        return input;
    }
    input.chars().take(max).collect()
}

/// Sanitize a free-text search term.
///
/// Invalid or absent input degrades to the empty string (no constraint),
/// never an error. Output never contains a stripped character and is at
/// most [`MAX_TERM_LEN`] characters.
pub fn sanitize_search_term(input: Option<&str>) -> String {
    let raw = match input {
        Some(s) if !s.is_empty() => s,
        _ => return String::new(),
    };
    truncate_chars(strip_and_trim(raw), MAX_TERM_LEN)
}

/// Sanitize a specialty code: exact members of the enumeration pass,
/// everything else becomes "no specialty filter".
pub fn sanitize_specialty(input: Option<&str>) -> Option<Specialty> {
    Specialty::from_code(input?)
}

/// Sanitize a neighborhood name. Same stripping as the search term,
/// truncated to [`MAX_NEIGHBORHOOD_LEN`]; empty results collapse to None.
pub fn sanitize_neighborhood(input: Option<&str>) -> Option<String> {
    let raw = match input {
        Some(s) if !s.is_empty() => s,
        _ => return None,
    };
    let cleaned = truncate_chars(strip_and_trim(raw), MAX_NEIGHBORHOOD_LEN);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_strips_dangerous_chars() {
        let out = sanitize_search_term(Some("<script>alert('x')%;&+</script>"));
        for c in STRIPPED {
            assert!(!out.contains(c), "output still contains {:?}", c);
        }
        assert_eq!(out, "scriptalertx/script");
    }

    #[test]
    fn test_term_trims_and_truncates() {
        assert_eq!(sanitize_search_term(Some("  seguro auto  ")), "seguro auto");

        let long = "a".repeat(300);
        assert_eq!(sanitize_search_term(Some(&long)).chars().count(), MAX_TERM_LEN);
    }

    #[test]
    fn test_term_empty_input() {
        assert_eq!(sanitize_search_term(None), "");
        assert_eq!(sanitize_search_term(Some("")), "");
        assert_eq!(sanitize_search_term(Some("   ")), "");
    }

    #[test]
    fn test_term_truncates_multibyte_on_char_boundary() {
        let long = "é".repeat(150);
        let out = sanitize_search_term(Some(&long));
        assert_eq!(out.chars().count(), MAX_TERM_LEN);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_specialty_exact_members_only() {
        assert_eq!(sanitize_specialty(Some("vida")), Some(Specialty::Vida));
        assert_eq!(sanitize_specialty(Some("saude")), Some(Specialty::Saude));
        assert_eq!(sanitize_specialty(Some("Vida")), None);
        assert_eq!(sanitize_specialty(Some("pet")), None);
        assert_eq!(sanitize_specialty(Some("")), None);
        assert_eq!(sanitize_specialty(None), None);
    }

    #[test]
    fn test_neighborhood_sanitization() {
        assert_eq!(sanitize_neighborhood(Some(" Aldeota ")), Some("Aldeota".to_string()));
        assert_eq!(sanitize_neighborhood(Some("<>%;")), None);
        assert_eq!(sanitize_neighborhood(Some("")), None);
        assert_eq!(sanitize_neighborhood(None), None);

        let long = "b".repeat(120);
        let out = sanitize_neighborhood(Some(&long)).unwrap();
        assert_eq!(out.chars().count(), MAX_NEIGHBORHOOD_LEN);
    }
}
