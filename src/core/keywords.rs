use crate::models::Specialty;

/// Keyword lists used to infer a specialty from a free-text term.
///
/// Iteration order is significant: the first specialty with a matching
/// keyword wins, so this is an ordered array rather than a map. Matching
/// is case-insensitive substring on the lowercased term.
pub const SPECIALTY_KEYWORDS: [(Specialty, &[&str]); 6] = [
    (
        Specialty::Auto,
        &["carro", "veículo", "veiculo", "auto", "automóvel", "automovel", "moto"],
    ),
    (
        Specialty::Vida,
        &["vida", "morte", "falecimento", "família", "familia"],
    ),
    (
        Specialty::Residencial,
        &["casa", "residência", "residencia", "imóvel", "imovel", "apartamento", "incêndio", "incendio"],
    ),
    (
        Specialty::Empresarial,
        &["empresa", "negócio", "negocio", "comercial", "cnpj"],
    ),
    (
        Specialty::Saude,
        &["saúde", "saude", "médico", "medico", "hospital", "plano"],
    ),
    (
        Specialty::Viagem,
        &["viagem", "viajar", "internacional", "turismo"],
    ),
];

/// Infer the specialty a search term most likely refers to.
///
/// Heuristic relevance boost, not a correctness guarantee: the caller uses
/// a hit to re-run a broader category query that can replace an exact text
/// match. Returns the first specialty whose keyword list has a substring
/// hit against the lowercased term.
pub fn infer_specialty(term: &str) -> Option<Specialty> {
    if term.is_empty() {
        return None;
    }
    let lowered = term.to_lowercase();

    for (specialty, keywords) in SPECIALTY_KEYWORDS {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return Some(specialty);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_basic_terms() {
        assert_eq!(infer_specialty("seguro de carro"), Some(Specialty::Auto));
        assert_eq!(infer_specialty("plano de saúde"), Some(Specialty::Saude));
        assert_eq!(infer_specialty("viagem internacional"), Some(Specialty::Viagem));
        assert_eq!(infer_specialty("seguro residencial apartamento"), Some(Specialty::Residencial));
    }

    #[test]
    fn test_infer_is_case_insensitive() {
        assert_eq!(infer_specialty("SEGURO AUTO"), Some(Specialty::Auto));
        assert_eq!(infer_specialty("Médico"), Some(Specialty::Saude));
    }

    #[test]
    fn test_first_match_wins() {
        // "carro" (auto) appears before "vida" in table order.
        assert_eq!(infer_specialty("seguro de carro e vida"), Some(Specialty::Auto));
        // "vida" (vida) beats "casa" (residencial) by table order.
        assert_eq!(infer_specialty("vida em casa"), Some(Specialty::Vida));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(infer_specialty(""), None);
        assert_eq!(infer_specialty("corretor confiável"), None);
    }
}
