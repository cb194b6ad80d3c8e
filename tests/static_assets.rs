//! Integration tests for static asset serving.

use std::fs;

use kashite_gateway::config::GatewayConfig;
use tempfile::TempDir;

mod common;

fn asset_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<html>kashite</html>").unwrap();
    fs::write(dir.path().join("app.js"), "console.log('app');").unwrap();
    fs::create_dir(dir.path().join("css")).unwrap();
    fs::write(dir.path().join("css/style.css"), "body { margin: 0 }").unwrap();
    dir
}

fn gateway_config(root: &TempDir) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    // Proxy endpoints are not exercised here; point upstream nowhere.
    config.upstream.base_url = "http://127.0.0.1:1".to_string();
    config.static_assets.root = root.path().to_path_buf();
    config
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn serves_bundle_files_with_content_types() {
    let root = asset_root();
    let (addr, shutdown) = common::start_gateway(gateway_config(&root)).await;

    let res = client()
        .get(format!("http://{addr}/app.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/javascript");
    assert_eq!(res.text().await.unwrap(), "console.log('app');");

    let res = client()
        .get(format!("http://{addr}/css/style.css"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "text/css");

    shutdown.trigger();
}

#[tokio::test]
async fn root_serves_index_document() {
    let root = asset_root();
    let (addr, shutdown) = common::start_gateway(gateway_config(&root)).await;

    let res = client().get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "<html>kashite</html>");

    shutdown.trigger();
}

#[tokio::test]
async fn spa_route_falls_back_to_index() {
    let root = asset_root();
    let (addr, shutdown) = common::start_gateway(gateway_config(&root)).await;

    let res = client()
        .get(format!("http://{addr}/some/spa/route"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "<html>kashite</html>");

    shutdown.trigger();
}

#[tokio::test]
async fn literal_traversal_path_is_404() {
    let root = asset_root();
    let (addr, shutdown) = common::start_gateway(gateway_config(&root)).await;

    // reqwest normalizes dot segments, so send the target verbatim.
    let (status, body) = common::raw_get(addr, "/../../etc/passwd").await;
    assert_eq!(status, 404);
    assert!(!body.contains("root:"), "must never leak file contents");

    shutdown.trigger();
}

#[tokio::test]
async fn head_request_returns_headers_only() {
    let root = asset_root();
    let (addr, shutdown) = common::start_gateway(gateway_config(&root)).await;

    let res = client()
        .head(format!("http://{addr}/app.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-length"], "19");
    assert!(res.text().await.unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn non_get_methods_are_rejected() {
    let root = asset_root();
    let (addr, shutdown) = common::start_gateway(gateway_config(&root)).await;

    let res = client()
        .post(format!("http://{addr}/app.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);

    shutdown.trigger();
}
