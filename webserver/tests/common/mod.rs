//! Router harness: a real CSV file in a temp dir, a real session registry and
//! a mocked advisor.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use advisor::traits::MockAdvisorClient;
use orderbook::RealCsvStore;
use webserver::{RealSessionRegistry, WebServer};

pub const PASSWORD: &str = "s3cret";

/// Six months of 2025 orders, one far-future order and one undated order
pub const ORDERS: &str = "\
Date,Customer_Name,Phone_Number,Order_Title,Pax,Pramusaji,Event_Type,Location,Menu_Items,Revenue
2025-01-10,Aisyah,0123456789,Kenduri,100,2,Wedding,Gombak,\"['Nasi Minyak, Ayam Masak Merah']\",1000
2025-02-10,Bala,,Lunch,100,4,Corporate,KL,['Nasi Lemak'],2000
2025-03-10,Chong,,Party,100,6,Buffet,Cheras,,3000
2025-04-10,Devi,,Packets,100,8,Packet,Kajang,,4000
2025-05-10,Eng,,Dinner,100,10,Buffet,Ampang,,5000
2025-06-10,Farid,,Majlis,100,12,Wedding,Shah Alam,['Nasi Minyak'],6000
2099-01-01,Unknown,0198765432,Reunion,50,1,Wedding,Ipoh,,900
TBC,Hana,,Walk-in,10,0,Other,,,
";

pub struct Harness {
    pub dir: TempDir,
    pub path: PathBuf,
    pub router: Router,
}

impl Harness {
    pub fn with_orders(contents: Option<&str>, advisor: MockAdvisorClient) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.csv");
        if let Some(contents) = contents {
            std::fs::write(&path, contents).unwrap();
        }

        let webserver = WebServer::new(
            "127.0.0.1:0".parse().unwrap(),
            Arc::new(RealCsvStore::new(path.clone())),
            Arc::new(advisor),
            Arc::new(RealSessionRegistry::new(PASSWORD)),
        );
        let router = webserver.build_router();
        Self { dir, path, router }
    }

    /// Default orders, advisor that must not be called
    pub fn new() -> Self {
        Self::with_orders(Some(ORDERS), MockAdvisorClient::new())
    }

    pub fn file_text(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn login(&self) -> String {
        let (status, body) = self
            .send(json_request("POST", "/api/login", None, &serde_json::json!({ "password": PASSWORD })))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(bare_request("GET", uri, Some(token))).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("POST", uri, Some(token), &body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("PUT", uri, Some(token), &body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(bare_request("DELETE", uri, Some(token))).await
    }
}

pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
