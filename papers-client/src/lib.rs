//! # Papers Client
//!
//! Search PubMed, fetch article metadata and flag authors with industry
//! affiliations.
//!
//! The pipeline is linear: an ESearch request returns PMIDs, one EFetch
//! request returns their records as XML, the parser keeps the authors whose
//! affiliation mentions a pharmaceutical, biotech or corporate keyword, and
//! [`export`] writes the result as CSV or as one JSON object per line.
//!
//! ## Quick Start
//!
//! ```no_run
//! use papers_client::{ClientConfig, PubMedClient, export};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new().with_max_results(10);
//!     let client = PubMedClient::with_config(config)?;
//!
//!     let records = client.search_and_fetch("cancer treatment").await?;
//!     for record in &records {
//!         println!("{}: {}", record.pmid, record.author_names().join(", "));
//!     }
//!
//!     export::save_to_csv("papers.csv", &records)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod pubmed;

// Re-export main types for convenience
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RESULTS};
pub use error::{PapersError, Result};
pub use filter::{AffiliationFilter, DEFAULT_AFFILIATION_KEYWORDS};
pub use pubmed::{ArticleRecord, ArticleRow, NonAcademicAuthor, PubMedClient};
