use crate::pipeline_tests::{create_test_config, mount_site};
use sitemap_lens::output::{generate_markdown_summary, write_csv, write_json, CSV_HEADERS};
use sitemap_lens::pipeline::run_analysis;
use sitemap_lens::{CancelFlag, MetaFetchOrchestrator, PageMetaRecord, SitemapResolver};
use wiremock::MockServer;

#[tokio::test]
async fn test_exports_after_analysis() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let config = create_test_config(2);
    let resolver = SitemapResolver::new(&config).unwrap();
    let orchestrator = MetaFetchOrchestrator::new(&config).unwrap();

    let (_, report) = run_analysis(
        &resolver,
        &orchestrator,
        &format!("{}/sitemap_index.xml", server.uri()),
        2,
        &CancelFlag::new(),
        |_| {},
    )
    .await
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("results.json");
    let csv_path = dir.path().join("results.csv");
    let summary_path = dir.path().join("summary.md");

    write_json(&report.records, &json_path).unwrap();
    write_csv(&report.records, &csv_path).unwrap();
    generate_markdown_summary(&report, &summary_path).unwrap();

    let json = std::fs::read_to_string(&json_path).unwrap();
    let parsed: Vec<PageMetaRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report.records);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADERS.to_vec());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.iter().filter(|r| &r[15] == "error").count(), 1);

    let summary = std::fs::read_to_string(&summary_path).unwrap();
    assert!(summary.contains("| Total URLs | 4 |"));
    assert!(summary.contains("| Selected | 3 |"));
    assert!(summary.contains("- **Failed**: 1"));
    assert!(summary.contains("## Errors"));
}
