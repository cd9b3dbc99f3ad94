//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per dashboard endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Sends `body` verbatim, for malformed payloads.
    pub async fn post_raw(&self, path: &str, body: &'static str) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("POST request failed")
    }

    // ========================================================================
    // Health & dashboard
    // ========================================================================

    pub async fn get_health(&self) -> Response {
        self.get("/health").await
    }

    pub async fn get_dashboard(&self) -> Response {
        self.get("/api/dashboard").await
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    pub async fn get_metrics(&self) -> Response {
        self.get("/api/metrics").await
    }

    pub async fn add_metric(&self, name: &str, value: f64) -> Response {
        self.add_metric_json(json!({ "name": name, "value": value }))
            .await
    }

    pub async fn add_metric_json(&self, body: Value) -> Response {
        self.post_json("/api/metrics", &body).await
    }

    // ========================================================================
    // Employees
    // ========================================================================

    pub async fn get_employees(&self) -> Response {
        self.get("/api/employees").await
    }

    pub async fn add_employee(&self, name: &str, position: &str, salary: f64) -> Response {
        self.add_employee_json(json!({ "name": name, "position": position, "salary": salary }))
            .await
    }

    pub async fn add_employee_json(&self, body: Value) -> Response {
        self.post_json("/api/employees", &body).await
    }

    // ========================================================================
    // Sales
    // ========================================================================

    pub async fn get_sales(&self) -> Response {
        self.get("/api/sales").await
    }

    pub async fn add_sale(&self, product: &str, amount: f64, customer: &str) -> Response {
        self.add_sale_json(json!({ "product": product, "amount": amount, "customer": customer }))
            .await
    }

    pub async fn add_sale_json(&self, body: Value) -> Response {
        self.post_json("/api/sales", &body).await
    }

    // ========================================================================
    // HTML pages
    // ========================================================================

    pub async fn get_page(&self, path: &str) -> Response {
        self.get(path).await
    }
}
