//! Search-and-fetch pipeline tests against mocked E-utilities endpoints
//!
//! wiremock stands in for NCBI ESearch and EFetch, so these tests exercise
//! request construction, status handling and parsing without network access.

use papers_client::{ClientConfig, PapersError, PubMedClient};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ESEARCH_TWO_IDS: &str = include_str!("../test_data/esearch/search_two_ids.json");
const ESEARCH_EMPTY: &str = include_str!("../test_data/esearch/search_empty.json");
const EFETCH_INDUSTRY_AUTHORS: &str = include_str!("../test_data/efetch/industry_authors.xml");

/// Helper to create a client pointing at a mock server
fn create_mock_client(mock_server: &MockServer) -> PubMedClient {
    let config = ClientConfig::new().with_base_url(mock_server.uri());
    PubMedClient::with_config(config).expect("client should build")
}

async fn mount_esearch(mock_server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "application/json"),
        )
        .mount(mock_server)
        .await;
}

async fn mount_efetch(mock_server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "application/xml"),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
#[traced_test]
async fn test_search_and_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("term", "cancer treatment"))
        .and(query_param("retmax", "10"))
        .and(query_param("usehistory", "y"))
        .and(query_param("retmode", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESEARCH_TWO_IDS))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("id", "12345678,87654321"))
        .and(query_param("retmode", "xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_INDUSTRY_AUTHORS))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let records = client
        .search_and_fetch("cancer treatment")
        .await
        .expect("pipeline should succeed");

    assert!(records.len() <= 2);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].pmid, "12345678");
    assert_eq!(records[0].author_names(), ["John Smith", "Kenji Tanaka"]);
    assert!(!records[1].has_industry_authors());

    assert!(logs_contain("Search completed"));
    assert!(logs_contain("Fetch completed"));
}

#[tokio::test]
#[traced_test]
async fn test_search_returns_ids_in_order() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, ESEARCH_TWO_IDS).await;

    let client = create_mock_client(&mock_server);
    let pmids = client.search_articles("cancer").await.unwrap();

    assert_eq!(pmids, ["12345678", "87654321"]);
}

#[tokio::test]
#[traced_test]
async fn test_empty_search_skips_fetch() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, ESEARCH_EMPTY).await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let records = client.search_and_fetch("zzqxnonexistentterm").await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_fetch_empty_input_makes_no_request() {
    let mock_server = MockServer::start().await;
    let client = create_mock_client(&mock_server);

    let no_ids: Vec<String> = Vec::new();
    let records = client.fetch_articles(&no_ids).await.unwrap();
    assert!(records.is_empty());

    let received_requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        received_requests.len(),
        0,
        "No HTTP requests should be made for empty input"
    );
}

#[tokio::test]
#[traced_test]
async fn test_fetch_articles_record_count_bounded_by_ids() {
    let mock_server = MockServer::start().await;
    mount_efetch(&mock_server, EFETCH_INDUSTRY_AUTHORS).await;

    let client = create_mock_client(&mock_server);
    let records = client
        .fetch_articles(&["12345678", "87654321", "11111111"])
        .await
        .unwrap();

    assert!(records.len() <= 3);
    assert_eq!(records.len(), 2);
}

#[tokio::test]
#[traced_test]
async fn test_result_cap_and_identification_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "25"))
        .and(query_param("tool", "get-papers-list"))
        .and(query_param("email", "dev@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESEARCH_TWO_IDS))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_max_results(25)
        .with_tool("get-papers-list")
        .with_email("dev@example.com");
    let client = PubMedClient::with_config(config).unwrap();

    let pmids = client.search_articles("cancer").await.unwrap();
    assert_eq!(pmids.len(), 2);
}

#[tokio::test]
#[traced_test]
async fn test_search_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = client.search_articles("cancer").await;

    match result {
        Err(PapersError::ApiError { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
#[traced_test]
async fn test_search_malformed_json() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, "{\"esearchresult\": {\"idlist\": [").await;

    let client = create_mock_client(&mock_server);
    let result = client.search_articles("cancer").await;

    assert!(matches!(result, Err(PapersError::JsonError(_))));
}

#[tokio::test]
#[traced_test]
async fn test_search_ncbi_error_payload() {
    let mock_server = MockServer::start().await;
    mount_esearch(
        &mock_server,
        r#"{"esearchresult": {"ERROR": "Search Backend failed"}}"#,
    )
    .await;

    let client = create_mock_client(&mock_server);
    let result = client.search_articles("cancer").await;

    match result {
        Err(PapersError::ApiError { status, message }) => {
            assert_eq!(status, 200);
            assert!(message.contains("Search Backend failed"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
#[traced_test]
async fn test_fetch_client_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = client.fetch_articles(&["12345678"]).await;

    assert!(matches!(
        result,
        Err(PapersError::ApiError { status: 400, .. })
    ));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_malformed_xml() {
    let mock_server = MockServer::start().await;
    mount_efetch(
        &mock_server,
        "<PubmedArticleSet><PubmedArticle><PMID>1</PMID></PubmedArticleSet>",
    )
    .await;

    let client = create_mock_client(&mock_server);
    let result = client.fetch_articles(&["1"]).await;

    assert!(matches!(result, Err(PapersError::XmlError(_))));
}

#[tokio::test]
#[traced_test]
async fn test_search_failure_aborts_before_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    assert!(client.search_and_fetch("cancer").await.is_err());
}

#[tokio::test]
#[traced_test]
async fn test_fetch_blank_ids_make_no_request() {
    let mock_server = MockServer::start().await;
    let client = create_mock_client(&mock_server);

    let records = client.fetch_articles(&["", "   "]).await.unwrap();
    assert!(records.is_empty());

    let received_requests = mock_server.received_requests().await.unwrap();
    assert!(received_requests.is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_fetch_drops_blank_ids_from_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "12345678,87654321"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_INDUSTRY_AUTHORS))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let records = client
        .fetch_articles(&["12345678", " ", "87654321"])
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
}

#[tokio::test]
#[traced_test]
async fn test_search_warns_when_count_exceeds_cap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"esearchresult": {"count": "1500", "retmax": "2", "idlist": ["12345678", "87654321"]}}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_max_results(2);
    let client = PubMedClient::with_config(config).unwrap();

    let pmids = client.search_articles("cancer").await.unwrap();

    assert_eq!(pmids.len(), 2);
    assert!(logs_contain("exceed the result cap"));
}

#[tokio::test]
#[traced_test]
async fn test_search_within_cap_does_not_warn() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, ESEARCH_TWO_IDS).await;

    let client = create_mock_client(&mock_server);
    client.search_articles("cancer").await.unwrap();

    assert!(!logs_contain("exceed the result cap"));
}
