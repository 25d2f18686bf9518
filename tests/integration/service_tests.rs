use crate::pipeline_tests::{create_test_config, mount_site};
use serde_json::json;
use sitemap_lens::service::{handle_batch_fetch, handle_resolve, BatchFetchRequest, ResolveRequest};
use sitemap_lens::{LensError, MetaFetchOrchestrator, SitemapResolver};
use wiremock::MockServer;

#[tokio::test]
async fn test_resolve_then_batch_fetch() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let config = create_test_config(20);
    let resolver = SitemapResolver::new(&config).unwrap();
    let orchestrator = MetaFetchOrchestrator::new(&config).unwrap();

    let resolved = handle_resolve(
        &resolver,
        ResolveRequest {
            url: Some(format!("{}/sitemap_index.xml", server.uri())),
        },
    )
    .await;
    assert!(resolved.error.is_none());
    assert_eq!(resolved.total_urls, 4);
    assert_eq!(resolved.urls[3].priority, Some(0.8));

    let urls: Vec<&str> = resolved.urls.iter().map(|e| e.loc.as_str()).collect();
    let request = BatchFetchRequest::from_json(&json!({ "urls": urls }), 50).unwrap();
    let response = handle_batch_fetch(&orchestrator, request).await.unwrap();

    assert_eq!(response.processed_count, 4);
    // /blog/b answers 500; /blog/c has no mock and answers 404
    assert_eq!(response.error_count, 2);
    assert_eq!(response.results[0].url, urls[0]);
}

#[tokio::test]
async fn test_batch_request_rejects_non_list() {
    let result = BatchFetchRequest::from_json(&json!({ "urls": { "a": 1 } }), 50);
    assert!(matches!(result, Err(LensError::Validation(_))));
}
