//! Search and filter helpers for the list screens.
//!
//! This module lives in `core` (zero internal deps) so the entity catalogue
//! and the controllers can share one definition of "matches the search box".

/// Case-insensitive substring match of `term` against any of `fields`.
///
/// An empty or whitespace-only term matches everything; the search box being
/// blank must not hide rows.
///
/// # Examples
///
/// ```
/// use bureau_core::search::matches_term;
/// assert!(matches_term("acm", &["Acme", "Paris"]));
/// assert!(matches_term("ACME", &["Acme"]));
/// assert!(!matches_term("globex", &["Acme", "Paris"]));
/// assert!(matches_term("  ", &[]));
/// ```
pub fn matches_term(term: &str, fields: &[&str]) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|f| f.to_lowercase().contains(&needle))
}

/// Status filter applied after the search term.
///
/// `All` bypasses filtering entirely; `Only` keeps rows whose status string
/// equals the selected value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    /// `true` when `status` passes this filter.
    pub fn allows(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- matches_term --------------------------------------------------------

    #[test]
    fn empty_term_matches_everything() {
        assert!(matches_term("", &["anything"]));
        assert!(matches_term("   ", &["anything"]));
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(matches_term("acm", &["Acme"]));
        assert!(matches_term("AcMe", &["acme studio"]));
    }

    #[test]
    fn any_field_may_match() {
        assert!(matches_term("paris", &["Acme", "Paris office"]));
    }

    #[test]
    fn no_field_match_is_a_miss() {
        assert!(!matches_term("globex", &["Acme", "Paris"]));
    }

    // -- StatusFilter --------------------------------------------------------

    #[test]
    fn all_allows_any_status() {
        assert!(StatusFilter::All.allows("draft"));
        assert!(StatusFilter::All.allows("archived"));
    }

    #[test]
    fn only_allows_exact_status() {
        let f = StatusFilter::Only("active".into());
        assert!(f.allows("active"));
        assert!(!f.allows("draft"));
    }
}
