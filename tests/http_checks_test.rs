// SPDX-License-Identifier: MIT
//! Integration tests for the live-site checks, served by canned TCP
//! responders on random local ports.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use sitecheck::checks::error_404::Error404ResponseCheck;
use sitecheck::checks::favicon::FaviconCheck;
use sitecheck::checks::html_lang::HtmlLanguageAttributeCheck;
use sitecheck::checks::sitemap::SiteMapCheck;
use sitecheck::health::text::{KeyEchoTextService, TextService};
use sitecheck::{HealthCheck, StatusResultType};

fn text() -> Arc<dyn TextService> {
    Arc::new(KeyEchoTextService)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn http_response(status_line: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Serve the same canned response to every connection.
async fn spawn_responder(response: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = Arc::new(response);

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let response = Arc::clone(&response);
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

/// A local address nothing is listening on.
async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ─── Favicon ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn favicon_reference_passes() {
    let body = r#"<html><head><link rel="icon" href="/favicon.ico"></head><body></body></html>"#;
    let url = spawn_responder(http_response("200 OK", "text/html", body)).await;

    let check = FaviconCheck::new(client(), url, text());
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Success);
}

#[tokio::test]
async fn missing_favicon_fails() {
    let body = "<html><head><title>t</title></head><body>plain</body></html>";
    let url = spawn_responder(http_response("200 OK", "text/html", body)).await;

    let check = FaviconCheck::new(client(), url, text());
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Error);
}

#[tokio::test]
async fn unreachable_site_is_an_error_status_not_a_fault() {
    let check = FaviconCheck::new(client(), dead_url().await, text());
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Error);
    assert_eq!(statuses[0].message, "faviconCheck/fetchFailed");
}

// ─── HTML language attribute ──────────────────────────────────────────────────

#[tokio::test]
async fn lang_attribute_passes_and_is_quoted() {
    let body = r#"<html lang="en-GB"><head></head><body></body></html>"#;
    let url = spawn_responder(http_response("200 OK", "text/html", body)).await;

    let check = HtmlLanguageAttributeCheck::new(client(), url, text());
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Success);
    assert!(statuses[0].message.contains("\"en-GB\""));
}

#[tokio::test]
async fn missing_lang_attribute_fails() {
    let body = "<html><head></head><body></body></html>";
    let url = spawn_responder(http_response("200 OK", "text/html", body)).await;

    let check = HtmlLanguageAttributeCheck::new(client(), url, text());
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Error);
}

// ─── Site map ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn xml_sitemap_passes() {
    let body = r#"<?xml version="1.0"?><urlset></urlset>"#;
    let url = spawn_responder(http_response("200 OK", "application/xml", body)).await;

    let check = SiteMapCheck::new(client(), url, text());
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Success);
}

#[tokio::test]
async fn non_xml_sitemap_is_distinguished_from_unreachable() {
    let url = spawn_responder(http_response("200 OK", "text/html", "<html></html>")).await;

    let check = SiteMapCheck::new(client(), url, text());
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Error);
    assert_eq!(statuses[0].message, "sitemapCheck/notXml");

    let check = SiteMapCheck::new(client(), dead_url().await, text());
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].message, "sitemapCheck/failed");
}

// ─── 404 response ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn default_404_marker_fails() {
    let body = "<html><body>This page can be replaced with a custom 404.</body></html>";
    let url = spawn_responder(http_response("404 Not Found", "text/html", body)).await;

    let check = Error404ResponseCheck::new(client(), url, text());
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Error);
    assert_eq!(statuses[0].message, "error404ResponseCheck/failed");
}

#[tokio::test]
async fn customized_404_page_passes() {
    let body = "<html><body>Sorry, we couldn't find that page.</body></html>";
    let url = spawn_responder(http_response("404 Not Found", "text/html", body)).await;

    let check = Error404ResponseCheck::new(client(), url, text());
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Success);
}

#[tokio::test]
async fn probe_answering_2xx_fails() {
    let url = spawn_responder(http_response("200 OK", "text/html", "<html></html>")).await;

    let check = Error404ResponseCheck::new(client(), url, text());
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Error);
    assert_eq!(statuses[0].message, "error404ResponseCheck/unexpected2xx");
}
