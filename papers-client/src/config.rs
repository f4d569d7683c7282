//! Client configuration
//!
//! [`ClientConfig`] collects everything the [`PubMedClient`](crate::PubMedClient)
//! needs to talk to NCBI E-utilities: the endpoint, the search result cap,
//! request identification parameters and the affiliation keywords used to
//! classify authors.

use std::time::Duration;

use crate::filter::{AffiliationFilter, DEFAULT_AFFILIATION_KEYWORDS};

/// Default NCBI E-utilities endpoint
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default number of identifiers requested from ESearch
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Configuration for the PubMed client
///
/// # Example
///
/// ```
/// use papers_client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_email("researcher@university.edu")
///     .with_max_results(25);
///
/// assert_eq!(config.max_results, 25);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the E-utilities API. `None` uses [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    /// Maximum number of identifiers returned by a search
    pub max_results: usize,
    /// Contact email sent with every request
    pub email: Option<String>,
    /// Tool name sent with every request
    pub tool: Option<String>,
    /// HTTP timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// Custom User-Agent header
    pub user_agent: Option<String>,
    /// Keywords marking an affiliation as non-academic
    pub affiliation_keywords: Vec<String>,
}

impl ClientConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            base_url: None,
            max_results: DEFAULT_MAX_RESULTS,
            email: None,
            tool: None,
            timeout: None,
            user_agent: None,
            affiliation_keywords: DEFAULT_AFFILIATION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }

    /// Point the client at a different E-utilities endpoint
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the search result cap
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the contact email NCBI asks clients to provide
    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the tool name reported to NCBI
    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Set the HTTP request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom User-Agent
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the affiliation keyword set
    pub fn with_affiliation_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.affiliation_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Base URL without a trailing slash
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("get-papers-list/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Query parameters appended to every E-utilities request
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(tool) = &self.tool {
            params.push(("tool".to_string(), tool.clone()));
        }

        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }

        params
    }

    pub fn affiliation_filter(&self) -> AffiliationFilter {
        AffiliationFilter::new(&self.affiliation_keywords)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
