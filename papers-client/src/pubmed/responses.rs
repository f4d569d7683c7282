use serde::{Deserialize, Serialize};

// ESearch API response structures
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchResult {
    pub esearchresult: ESearchData,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchData {
    #[serde(default, rename = "ERROR")]
    pub error: Option<String>,
    #[serde(default)]
    pub count: Option<String>,
    #[serde(default)]
    pub idlist: Vec<String>,
    /// How PubMed interpreted and translated the search query
    #[serde(default)]
    pub querytranslation: Option<String>,
}

impl ESearchData {
    pub fn total_count(&self) -> usize {
        self.count
            .as_deref()
            .and_then(|c| c.parse().ok())
            .unwrap_or(0)
    }
}
