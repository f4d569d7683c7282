pub mod fetch;

use std::time::Duration;

use anyhow::{Context, Result};
use papers_client::{ClientConfig, PubMedClient};

/// Request settings shared by every command
#[derive(Debug, Clone)]
pub struct ClientOptions<'a> {
    pub email: Option<&'a str>,
    pub tool: &'a str,
    pub timeout_secs: Option<u64>,
    pub max_results: usize,
}

pub fn create_pubmed_client(options: &ClientOptions<'_>) -> Result<PubMedClient> {
    let mut config = ClientConfig::new()
        .with_tool(options.tool)
        .with_max_results(options.max_results);

    if let Some(email) = options.email {
        config = config.with_email(email);
    }

    if let Some(secs) = options.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    PubMedClient::with_config(config).context("Failed to build PubMed client")
}
