use crate::config::ClientConfig;
use crate::error::{PapersError, Result};
use crate::filter::AffiliationFilter;
use crate::pubmed::models::ArticleRecord;
use crate::pubmed::parser::parse_articles_from_xml;
use crate::pubmed::responses::ESearchResult;
use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

/// Client for the PubMed ESearch and EFetch endpoints
///
/// Requests are issued one at a time; [`search_and_fetch`](Self::search_and_fetch)
/// awaits the search before starting the fetch.
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    filter: AffiliationFilter,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a new PubMed client with default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use papers_client::PubMedClient;
    ///
    /// let client = PubMedClient::new()?;
    /// assert_eq!(client.config().max_results, 10);
    /// # Ok::<(), papers_client::PapersError>(())
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new PubMed client with custom configuration
    ///
    /// # Errors
    ///
    /// * `PapersError::InvalidConfig` - If the HTTP client cannot be built
    ///
    /// # Example
    ///
    /// ```
    /// use papers_client::{ClientConfig, PubMedClient};
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new()
    ///     .with_email("researcher@university.edu")
    ///     .with_timeout(Duration::from_secs(30));
    ///
    /// let client = PubMedClient::with_config(config)?;
    /// # Ok::<(), papers_client::PapersError>(())
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.effective_user_agent());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| PapersError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a new PubMed client around an existing reqwest client
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        let base_url = config.effective_base_url().to_string();
        let filter = config.affiliation_filter();

        Self {
            client,
            base_url,
            filter,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Search PubMed and return the matching PMIDs
    ///
    /// At most `max_results` identifiers are returned, in the order ESearch
    /// ranks them. A blank query returns an empty list without a request.
    ///
    /// # Errors
    ///
    /// * `PapersError::RequestError` - If the HTTP request fails
    /// * `PapersError::ApiError` - On a non-success status or an NCBI `ERROR` payload
    /// * `PapersError::JsonError` - If the response is not valid ESearch JSON
    ///
    /// # Example
    ///
    /// ```no_run
    /// use papers_client::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new()?;
    ///     let pmids = client.search_articles("cancer immunotherapy").await?;
    ///     println!("Found {} articles", pmids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(query = %query, max_results = self.config.max_results))]
    pub async fn search_articles(&self, query: &str) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            debug!("Empty query provided, returning empty results");
            return Ok(Vec::new());
        }

        let max_results = self.config.max_results;
        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&usehistory=y&retmode=json",
            self.base_url,
            urlencoding::encode(query),
            max_results
        );

        debug!("Making ESearch API request");
        let response = self.make_request(&url).await?;
        let body = response.text().await?;
        let search_result: ESearchResult = serde_json::from_str(&body)?;
        let data = search_result.esearchresult;

        // NCBI sometimes returns 200 OK with an ERROR field
        if let Some(error_msg) = &data.error {
            return Err(PapersError::ApiError {
                status: 200,
                message: format!("NCBI ESearch API error: {}", error_msg),
            });
        }

        let total_count = data.total_count();
        if total_count > max_results {
            warn!(
                "Total results ({}) exceed the result cap ({}). Only the first {} articles are used.",
                total_count, max_results, max_results
            );
        }

        info!(
            total_count,
            returned_count = data.idlist.len(),
            query_translation = ?data.querytranslation,
            "Search completed"
        );

        Ok(data.idlist)
    }

    /// Fetch full records for the given PMIDs in one EFetch request
    ///
    /// Authors are classified with the configured affiliation keywords.
    /// Blank identifiers are skipped; when none remain it returns without a request.
    ///
    /// # Errors
    ///
    /// * `PapersError::RequestError` - If the HTTP request fails
    /// * `PapersError::ApiError` - On a non-success status
    /// * `PapersError::XmlError` - If the response is not well-formed XML
    ///
    /// # Example
    ///
    /// ```no_run
    /// use papers_client::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new()?;
    ///     let records = client.fetch_articles(&["31978945", "33515491"]).await?;
    ///     for record in &records {
    ///         println!("{}: {}", record.pmid, record.title);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, pmids), fields(pmids_count = pmids.len()))]
    pub async fn fetch_articles<S: AsRef<str>>(&self, pmids: &[S]) -> Result<Vec<ArticleRecord>> {
        let ids: Vec<&str> = pmids
            .iter()
            .map(|id| id.as_ref().trim())
            .filter(|id| !id.is_empty())
            .collect();

        if ids.is_empty() {
            debug!("No PMIDs to fetch");
            return Ok(Vec::new());
        }

        let id_list = ids.join(",");

        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url,
            urlencoding::encode(&id_list)
        );

        debug!(batch_size = ids.len(), "Making EFetch API request");
        let response = self.make_request(&url).await?;
        let xml = response.bytes().await?;

        let records = parse_articles_from_xml(&xml, &self.filter)?;
        info!(
            requested = ids.len(),
            parsed = records.len(),
            with_industry_authors = records.iter().filter(|r| r.has_industry_authors()).count(),
            "Fetch completed"
        );

        Ok(records)
    }

    /// Search PubMed and fetch the records of every hit
    ///
    /// # Example
    ///
    /// ```no_run
    /// use papers_client::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new()?;
    ///     let records = client.search_and_fetch("monoclonal antibody").await?;
    ///     for record in records.iter().filter(|r| r.has_industry_authors()) {
    ///         println!("{}: {}", record.pmid, record.author_names().join(", "));
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn search_and_fetch(&self, query: &str) -> Result<Vec<ArticleRecord>> {
        let pmids = self.search_articles(query).await?;
        self.fetch_articles(&pmids).await
    }

    /// Send a GET request, appending the configured `tool`/`email` parameters
    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut final_url = url.to_string();
        let api_params = self.config.build_api_params();

        if !api_params.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            final_url.push(separator);

            let param_strings: Vec<String> = api_params
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
                .collect();
            final_url.push_str(&param_strings.join("&"));
        }

        debug!("Making API request to: {}", final_url);
        let response = self.client.get(&final_url).send().await?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(PapersError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        Ok(response)
    }
}
