use std::{io, result};

use thiserror::Error;

/// Error types for fetching, parsing and exporting papers
#[derive(Error, Debug)]
pub enum PapersError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// Generic API error with HTTP status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// CSV serialization failed
    #[error("CSV write failed: {0}")]
    CsvError(#[from] csv::Error),

    /// IO error for file and console output
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// The HTTP client could not be built from the configuration
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = result::Result<T, PapersError>;

impl From<quick_xml::Error> for PapersError {
    fn from(err: quick_xml::Error) -> Self {
        PapersError::XmlError(err.to_string())
    }
}
