//! PubMed client for searching and fetching article metadata
//!
//! - `client` - ESearch/EFetch requests
//! - `models` - [`ArticleRecord`] and its flat [`ArticleRow`] form
//! - `parser` - streaming EFetch XML parser
//! - `responses` - ESearch JSON response types

pub mod client;
pub mod models;
pub mod parser;
pub(crate) mod responses;

// Re-export public types
pub use client::PubMedClient;
pub use models::{
    ArticleRecord, ArticleRow, NONE_SENTINEL, NonAcademicAuthor, UNKNOWN_DATE, UNKNOWN_TITLE,
};
pub use parser::{extract_email_from_text, parse_articles_from_xml};
