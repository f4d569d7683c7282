//! Affiliation keyword filter
//!
//! An author counts as non-academic when one of their affiliation strings
//! contains an industry keyword, compared case-insensitively.

/// Keywords marking pharmaceutical, biotech and corporate affiliations
pub const DEFAULT_AFFILIATION_KEYWORDS: [&str; 5] =
    ["pharma", "biotech", "corporation", "inc.", "ltd"];

/// Case-insensitive substring matcher over affiliation text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliationFilter {
    keywords: Vec<String>,
}

impl AffiliationFilter {
    /// Build a filter from a keyword set. Empty keywords are ignored so they
    /// cannot match every affiliation.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether the affiliation text names a company
    pub fn is_non_academic(&self, affiliation: &str) -> bool {
        if affiliation.trim().is_empty() {
            return false;
        }

        let lowered = affiliation.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    /// First affiliation in the list that matches a keyword
    pub fn first_match<'a>(&self, affiliations: &'a [String]) -> Option<&'a str> {
        affiliations
            .iter()
            .map(String::as_str)
            .find(|a| self.is_non_academic(a))
    }
}

impl Default for AffiliationFilter {
    fn default() -> Self {
        Self::new(&DEFAULT_AFFILIATION_KEYWORDS)
    }
}
