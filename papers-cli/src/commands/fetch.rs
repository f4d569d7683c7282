use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use papers_client::export;
use tracing::info;

use super::{ClientOptions, create_pubmed_client};

#[derive(Args, Debug)]
pub struct FetchPapers {
    /// PubMed search query (free text)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Save results as CSV to this file instead of printing them
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl FetchPapers {
    pub async fn execute(&self, options: &ClientOptions<'_>) -> Result<()> {
        let client = create_pubmed_client(options)?;

        info!("Fetching papers...");
        let records = client
            .search_and_fetch(&self.query)
            .await
            .with_context(|| format!("Failed to fetch papers for query '{}'", self.query))?;

        match &self.file {
            Some(path) => {
                export::save_to_csv(path, &records)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Results saved to {}", path.display());
            }
            None => {
                info!("Results:");
                export::print_records(io::stdout().lock(), &records)?;
            }
        }

        Ok(())
    }
}
