use std::net::SocketAddr;

use serde_json::{json, Value};
use service::storage::FileCategoryStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;
use reqwest::StatusCode as HttpStatusCode;

use server::routes;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Use an isolated data directory per test run
    let temp_id = Uuid::new_v4();
    let data_dir = std::env::temp_dir().join(format!("e2e_data_{}", temp_id));
    let store = FileCategoryStore::new(&data_dir).await?;

    let app = routes::build_router(store, "/nonexistent-frontend", CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_save_and_load_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let products = json!([{"id": 1, "name": "满级神装", "price": 899}]);
    let res = c.post(format!("{}/api/save-data", app.base_url))
        .json(&json!({"type": "products", "data": products}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["files"], json!(["products"]));

    let res = c.get(format!("{}/api/load-data/products", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"], products);
    Ok(())
}

#[tokio::test]
async fn e2e_cors_preflight_allowed() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.request(reqwest::Method::OPTIONS, format!("{}/api/save-data", app.base_url))
        .header("Origin", "http://localhost:8000")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send().await?;
    assert!(res.status().is_success());
    assert!(res.headers().get("access-control-allow-origin").is_some());
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_static_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/missing.html", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
