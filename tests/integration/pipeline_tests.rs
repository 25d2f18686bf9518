use sitemap_lens::config::Config;
use sitemap_lens::pipeline::run_analysis;
use sitemap_lens::{CancelFlag, FetchStatus, MetaFetchOrchestrator, SitemapResolver};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given per-parent limit
pub fn create_test_config(limit: usize) -> Config {
    let mut config = Config::default();
    config.limits.max_children_per_parent = limit;
    config.fetcher.page_timeout_secs = 2;
    config
}

/// Mounts a small site: an index with one good and one missing sitemap,
/// four pages of which one fails
pub async fn mount_site(server: &MockServer) {
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap_index.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>{base}/sitemap-pages.xml</loc></sitemap>
  <sitemap><loc>{base}/sitemap-missing.xml</loc></sitemap>
</sitemapindex>"#
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap-pages.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/blog/a</loc><lastmod>2024-02-01</lastmod></url>
  <url><loc>{base}/blog/b</loc></url>
  <url><loc>{base}/blog/c</loc></url>
  <url><loc>{base}/about</loc><priority>0.8</priority></url>
</urlset>"#
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap-missing.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/blog/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head>
                <title>Post A</title>
                <meta name="description" content="First post">
                <meta property="og:title" content="Post A on OG">
                <meta property="og:image" content="/images/a.png">
                <meta name="twitter:card" content="summary_large_image">
                <link rel="icon" href="/static/icon.png">
            </head><body></body></html>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/blog/b"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><title>About</title>
                <meta property="og:description" content="Who we are">
            </head></html>"#,
        ))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_analysis_with_nested_index() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let base = server.uri();

    let config = create_test_config(2);
    let resolver = SitemapResolver::new(&config).unwrap();
    let orchestrator = MetaFetchOrchestrator::new(&config).unwrap();

    let mut progress = Vec::new();
    let (analysis, report) = run_analysis(
        &resolver,
        &orchestrator,
        &format!("{}/sitemap_index.xml", base),
        2,
        &CancelFlag::new(),
        |p| progress.push(p.percent),
    )
    .await
    .unwrap();

    // the missing nested sitemap contributes nothing
    assert_eq!(analysis.entries().len(), 4);
    assert_eq!(report.tree_stats.total_original_urls, 4);
    assert_eq!(report.tree_stats.total_limited_urls, 3);

    // /blog/c is beyond the limit of two children under /blog
    assert_eq!(report.selected_count, 3);
    assert!(!analysis.selection().contains(&format!("{}/blog/c", base)));

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.success_count(), 2);
    assert_eq!(report.error_count(), 1);
    assert!(!report.cancelled);
    assert_eq!(progress, vec![100]);

    let post = report
        .records
        .iter()
        .find(|r| r.url == format!("{}/blog/a", base))
        .unwrap();
    assert_eq!(post.title, "Post A");
    assert_eq!(post.description, "First post");
    assert_eq!(post.og_title, "Post A on OG");
    assert_eq!(post.og_image, "/images/a.png");
    assert_eq!(post.twitter_card, "summary_large_image");
    assert_eq!(post.favicon, format!("{}/static/icon.png", base));
    assert_eq!(post.canonical, format!("{}/blog/a", base));

    let about = report
        .records
        .iter()
        .find(|r| r.url == format!("{}/about", base))
        .unwrap();
    assert_eq!(about.description, "Who we are");
    assert_eq!(about.favicon, format!("{}/favicon.ico", base));

    let failed = report
        .records
        .iter()
        .find(|r| r.url == format!("{}/blog/b", base))
        .unwrap();
    assert_eq!(failed.status, FetchStatus::Error);
    assert!(failed.error.as_deref().unwrap().contains("500"));
    assert!(failed.title.is_empty());
}

#[tokio::test]
async fn test_raising_limit_reselects_everything() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let config = create_test_config(2);
    let resolver = SitemapResolver::new(&config).unwrap();
    let orchestrator = MetaFetchOrchestrator::new(&config).unwrap();

    let (mut analysis, _) = run_analysis(
        &resolver,
        &orchestrator,
        &format!("{}/sitemap_index.xml", server.uri()),
        2,
        &CancelFlag::new(),
        |_| {},
    )
    .await
    .unwrap();

    assert!(analysis.set_limit(5));
    assert_eq!(analysis.selected_urls().len(), 4);
    assert_eq!(analysis.stats().total_limited_urls, 4);
}

#[tokio::test]
async fn test_resolution_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = create_test_config(20);
    let resolver = SitemapResolver::new(&config).unwrap();
    let orchestrator = MetaFetchOrchestrator::new(&config).unwrap();

    let result = run_analysis(
        &resolver,
        &orchestrator,
        &format!("{}/sitemap.xml", server.uri()),
        20,
        &CancelFlag::new(),
        |_| {},
    )
    .await;

    let err = result.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_cancelled_before_fetch() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let config = create_test_config(20);
    let resolver = SitemapResolver::new(&config).unwrap();
    let orchestrator = MetaFetchOrchestrator::new(&config).unwrap();
    let cancel = CancelFlag::new();
    cancel.cancel();

    let (_, report) = run_analysis(
        &resolver,
        &orchestrator,
        &format!("{}/sitemap_index.xml", server.uri()),
        20,
        &cancel,
        |_| {},
    )
    .await
    .unwrap();

    assert!(report.cancelled);
    assert!(report.records.is_empty());
    assert_eq!(report.selected_count, 4);
}
