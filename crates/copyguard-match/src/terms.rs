//! Term list normalization and containment checks

/// Normalize a raw comma-separated term list: split on commas, trim,
/// lowercase, drop empties. Input order is preserved.
pub fn normalize_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

/// First term (in input order) contained in `content`, case-insensitively.
pub fn find_first_match<'a>(content: &str, terms: &'a [String]) -> Option<&'a str> {
    let haystack = content.to_lowercase();
    terms
        .iter()
        .find(|term| haystack.contains(term.as_str()))
        .map(String::as_str)
}

/// Every term contained in `content`, case-insensitively, in input order.
pub fn find_all_matches<'a>(content: &str, terms: &'a [String]) -> Vec<&'a str> {
    let haystack = content.to_lowercase();
    terms
        .iter()
        .filter(|term| haystack.contains(term.as_str()))
        .map(String::as_str)
        .collect()
}
