//! Field extraction from free text: emails in affiliations, years in dates

use regex::Regex;
use std::sync::OnceLock;

/// Extract an email address from affiliation text.
///
/// PubMed records usually append the address to the affiliation, as in
/// `"... Boston, MA, USA. Electronic address: jane@pharma.com."`.
pub fn extract_email_from_text(text: &str) -> Option<String> {
    text.split_whitespace()
        .find(|part| part.contains('@') && part.contains('.'))
        .map(|part| {
            part.trim_start_matches(&['(', '<', '['][..])
                .trim_end_matches(&['.', ',', ';', ')', '>', ']'][..])
                .to_string()
        })
        .filter(|email| email.len() > 5)
}

/// First four-digit year in a free-form date such as a `MedlineDate`
pub fn extract_year(text: &str) -> Option<String> {
    static YEAR_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = YEAR_REGEX
        .get_or_init(|| Regex::new(r"\b(\d{4})\b").expect("Failed to compile year regex"));

    re.captures(text).map(|caps| caps[1].to_string())
}
