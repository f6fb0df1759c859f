#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use property_catalog::api::{build_router, AppState};
use property_catalog::client::CatalogClient;
use property_catalog::store::MemoryStore;
use reqwest::Client;
use serde_json::{json, Value};

pub struct TestResponse {
    pub status: u16,
    pub body: Value,
    pub text: String,
}

/// Catalog server on an ephemeral port, backed by a fresh in-memory store
pub struct TestApp {
    pub base_url: String,
    pub api_url: String,
    http: Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::start(None).await
    }

    /// Serve the web client from `assets` as in production mode
    pub async fn spawn_with_assets(assets: &Path) -> Self {
        Self::start(Some(assets)).await
    }

    async fn start(assets: Option<&Path>) -> Self {
        let app = build_router(AppState::new(Arc::new(MemoryStore::new())), assets);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            api_url: format!("http://{}/api", addr),
            http: Client::new(),
        }
    }

    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&self.api_url).expect("Failed to build catalog client")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn into_test_response(response: reqwest::Response) -> TestResponse {
        let status = response.status().as_u16();
        let text = response.text().await.expect("Failed to read body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        TestResponse { status, body, text }
    }

    /// GET a path relative to the server root rather than `/api`
    pub async fn get_root(&self, path: &str) -> TestResponse {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(url).send().await.unwrap();
        Self::into_test_response(response).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let response = self.http.get(self.url(path)).send().await.unwrap();
        Self::into_test_response(response).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let response = self.http.post(self.url(path)).json(body).send().await.unwrap();
        Self::into_test_response(response).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let response = self.http.put(self.url(path)).json(body).send().await.unwrap();
        Self::into_test_response(response).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let response = self.http.delete(self.url(path)).send().await.unwrap();
        Self::into_test_response(response).await
    }

    /// Create a listing and return its id
    pub async fn create(&self, body: &Value) -> String {
        let res = self.post("/properties", body).await;
        assert_eq!(res.status, 201, "create failed: {}", res.body);
        res.body["_id"].as_str().expect("missing _id").to_string()
    }
}

pub fn listing(title: &str, price: f64) -> Value {
    json!({
        "title": title,
        "description": "Bright rooms and a garden",
        "price": price,
        "location": "Pune",
        "type": "House",
        "status": "For Sale",
        "bedrooms": 3,
        "bathrooms": 2,
        "area": 1500,
        "imageUrl": "https://img.example/house.jpg"
    })
}
