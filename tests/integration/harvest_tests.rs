//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small imitation of the listing site
//! and run the whole pipeline through the HTTP renderer.

use startup_harvest::config::{Config, RendererKind};
use startup_harvest::crawler::{run_harvest, Harvester};
use startup_harvest::output::{MemorySink, CSV_HEADERS};
use startup_harvest::renderer::HttpLauncher;
use startup_harvest::HarvestError;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_PATH: &str = "/hktech300/start-ups/all-start-ups";
const ACME_PATH: &str = "/hktech300/start-ups/seed-fund-teams/acme";
const BETA_PATH: &str = "/hktech300/start-ups/angel-fund-teams/beta";
const GAMMA_PATH: &str = "/hktech300/start-ups/ideation-teams/gamma";

/// Creates a fast HTTP-renderer configuration pointed at the mock server
fn create_test_config(base_url: &str, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.site.own_domain = "127.0.0.1".to_string();

    config.crawl.max_pages = 3;
    config.crawl.settle_delay_ms = 0;
    config.crawl.backoff_min_ms = 0;
    config.crawl.backoff_max_ms = 0;
    config.crawl.rate_limit_ms = 0;

    config.renderer.kind = RendererKind::Http;
    config.renderer.page_load_timeout_secs = 5;

    config.output.csv_path = dir.path().join("startups.csv").display().to_string();
    config.output.log_path = None;
    config.output.summary_path = Some(dir.path().join("summary.md").display().to_string());
    config
}

fn html(body: &str) -> String {
    format!("<html><head><title>HK Tech 300</title></head><body>{}</body></html>", body)
}

async fn mount_listing(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(html(body)))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, detail_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(detail_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(html(body)))
        .mount(server)
        .await;
}

/// Page 0 lists Acme, page 1 repeats Acme and adds Beta, page 2 is missing.
/// Beta's detail page always answers 500.
async fn start_mock_site() -> MockServer {
    let server = MockServer::start().await;
    let origin = server.uri();

    mount_listing(
        &server,
        "0",
        &format!(
            r#"<a href="{}">Acme</a><a href="/hktech300/start-ups/news">News</a>"#,
            ACME_PATH
        ),
    )
    .await;
    mount_listing(
        &server,
        "1",
        &format!(
            r#"<a href="{}"> Acme </a><a href="{}">Beta</a>"#,
            ACME_PATH, BETA_PATH
        ),
    )
    .await;

    mount_detail(
        &server,
        ACME_PATH,
        &format!(
            r#"<a href="{}/hktech300">Back</a>
               <a href="https://acme.io">Website</a>
               <a href="mailto:hello@acme.io">Email</a>"#,
            origin
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path(BETA_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn test_full_harvest_writes_csv() {
    let server = start_mock_site().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir);
    let csv_path = config.output.csv_path.clone();

    let summary = run_harvest(config, "test-hash").await.unwrap();

    assert_eq!(summary.pages_loaded, 2);
    assert_eq!(summary.pages_skipped, 1);
    assert_eq!(summary.unique_links, 2);
    assert_eq!(summary.duplicate_links, 1);
    assert_eq!(summary.records_extracted, 1);
    assert_eq!(summary.records_placeholder, 1);
    assert_eq!(summary.records_written, 2);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADERS.to_vec());

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);

    assert_eq!(&rows[0][0], "Acme");
    assert_eq!(rows[0][1], format!("{}{}", server.uri(), ACME_PATH));
    assert_eq!(&rows[0][2], "https://acme.io");
    assert_eq!(&rows[0][3], "hello@acme.io");

    assert_eq!(&rows[1][0], "Beta");
    assert_eq!(rows[1][1], format!("{}{}", server.uri(), BETA_PATH));
    assert_eq!(&rows[1][2], "No Info Found");
    assert_eq!(&rows[1][3], "No Info Found");
}

#[tokio::test]
async fn test_summary_markdown_written() {
    let server = start_mock_site().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir);
    let summary_path = config.output.summary_path.clone().unwrap();

    run_harvest(config, "test-hash").await.unwrap();

    let markdown = std::fs::read_to_string(summary_path).unwrap();
    assert!(markdown.contains("# Startup Harvest Summary"));
    assert!(markdown.contains("- **Config Hash**: test-hash"));
    assert!(markdown.contains("| Skipped | 1 |"));
}

#[tokio::test]
async fn test_denylisted_links_and_generic_email_dropped() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), &dir);
    config.crawl.max_pages = 1;

    mount_listing(&server, "0", &format!(r#"<a href="{}">Gamma</a>"#, GAMMA_PATH)).await;
    mount_detail(
        &server,
        GAMMA_PATH,
        r#"<a href="https://www.linkedin.com/company/gamma">LinkedIn</a>
           <a href="https://gamma.hk">Website</a>
           <a href="mailto:HKTech300.Info@cityu.edu.hk">Contact</a>"#,
    )
    .await;

    let mut sink = MemorySink::new();
    Harvester::new(config, HttpLauncher::new())
        .run(&mut sink)
        .await
        .unwrap();

    assert_eq!(sink.records.len(), 1);
    let gamma = &sink.records[0];
    assert_eq!(gamma.name, "Gamma");
    // Only the first external link is considered
    assert_eq!(gamma.website, None);
    assert_eq!(gamma.email, None);
}

#[tokio::test]
async fn test_zero_pages_writes_header_only() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), &dir);
    config.crawl.max_pages = 0;
    let csv_path = config.output.csv_path.clone();

    let summary = run_harvest(config, "test-hash").await.unwrap();

    assert_eq!(summary.records_written, 0);
    let contents = std::fs::read_to_string(csv_path).unwrap();
    assert_eq!(contents, "Company Name,CityU URL,Company Website,Email\n");
}

#[tokio::test]
async fn test_missing_browser_is_startup_failure() {
    let dir = TempDir::new().unwrap();
    let mut config = create_test_config("https://www.cityu.edu.hk", &dir);
    config.renderer.kind = RendererKind::Chrome;
    config.renderer.executable = Some("/nonexistent/chromium-browser".to_string());
    let csv_path = config.output.csv_path.clone();

    let result = run_harvest(config, "test-hash").await;

    assert!(matches!(result, Err(HarvestError::StartupFailure(_))));
    assert!(!std::path::Path::new(&csv_path).exists());
}
