use anyhow::Result;
use clap::Parser;
use papers_client::DEFAULT_MAX_RESULTS;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

use commands::ClientOptions;

#[derive(Parser, Debug)]
#[command(
    name = "get-papers-list",
    version,
    about = "List PubMed papers with pharmaceutical or biotech affiliated authors",
    long_about = "Search PubMed for a query, fetch the matching records and report the authors \
                  whose affiliation names a pharmaceutical, biotech or corporate organization"
)]
struct Cli {
    #[command(flatten)]
    fetch: commands::fetch::FetchPapers,

    /// Enable debug logging
    #[arg(short, long, visible_alias = "verbose")]
    debug: bool,

    /// Maximum number of search results to fetch
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    /// Email for NCBI requests (recommended)
    #[arg(long)]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, default_value = "get-papers-list")]
    tool: String,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

impl Cli {
    fn client_options(&self) -> ClientOptions<'_> {
        ClientOptions {
            email: self.email.as_deref(),
            tool: &self.tool,
            timeout_secs: self.timeout,
            max_results: self.max_results,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stderr keeps stdout free for records
    let filter = if cli.debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    cli.fetch.execute(&cli.client_options()).await
}
