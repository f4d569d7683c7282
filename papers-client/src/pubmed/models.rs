use serde::{Deserialize, Serialize};

/// Placeholder used when an article has no `ArticleTitle`
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Placeholder used when an article has no publication year
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Sentinel written for empty author lists and missing emails
pub const NONE_SENTINEL: &str = "None";

/// An author whose affiliation matched an industry keyword, paired with that affiliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonAcademicAuthor {
    pub name: String,
    pub affiliation: String,
}

/// Bibliographic metadata for one PubMed article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// PubMed ID
    pub pmid: String,
    pub title: String,
    /// Publication year, or [`UNKNOWN_DATE`]
    pub publication_date: String,
    /// Industry-affiliated authors in document order
    pub non_academic_authors: Vec<NonAcademicAuthor>,
    /// First email address found in the article
    pub corresponding_email: Option<String>,
}

impl ArticleRecord {
    /// Full names of the non-academic authors
    pub fn author_names(&self) -> Vec<&str> {
        self.non_academic_authors
            .iter()
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Company affiliations, aligned with [`author_names`](Self::author_names)
    pub fn company_affiliations(&self) -> Vec<&str> {
        self.non_academic_authors
            .iter()
            .map(|a| a.affiliation.as_str())
            .collect()
    }

    pub fn has_industry_authors(&self) -> bool {
        !self.non_academic_authors.is_empty()
    }

    /// Flatten the record into the six output columns
    pub fn to_row(&self) -> ArticleRow {
        ArticleRow {
            pmid: self.pmid.clone(),
            title: self.title.clone(),
            publication_date: self.publication_date.clone(),
            non_academic_authors: join_or_none(&self.author_names()),
            company_affiliations: join_or_none(&self.company_affiliations()),
            corresponding_email: self
                .corresponding_email
                .clone()
                .unwrap_or_else(|| NONE_SENTINEL.to_string()),
        }
    }
}

/// One output row, keyed by the CSV column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRow {
    #[serde(rename = "PubmedID")]
    pub pmid: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: String,
}

fn join_or_none(values: &[&str]) -> String {
    if values.is_empty() {
        NONE_SENTINEL.to_string()
    } else {
        values.join(", ")
    }
}
