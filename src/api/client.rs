//! HTTP client for the remote construction-management API. One client per
//! process; once a login has stored a bearer token it is attached to every
//! request, which is how the gated CRUD endpoints expect to be called.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::AppError;

use super::models::{Credentials, Employee, InventoryItem, Project, RegisterRequest, Task};

pub struct ApiClient {
    base: Url,
    client: reqwest::Client,
    bearer: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base).context("invalid API base URL")?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            base,
            client,
            bearer: RwLock::new(None),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Install or clear the bearer token used for subsequent requests.
    pub fn set_bearer(&self, token: Option<String>) {
        *self.bearer.write() = token.filter(|t| !t.is_empty());
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = self.base.join(path)?;
        let mut rb = self.client.request(method, url);
        if let Some(tok) = self.bearer.read().as_ref() {
            rb = rb.bearer_auth(tok);
        }
        Ok(rb)
    }

    async fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = if body.is_empty() { status.to_string() } else { body };
        Err(AppError::from_http_status(status.as_u16(), message).into())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("api.get {}", path);
        let resp = self.request(Method::GET, path)?.send().await?;
        Ok(Self::expect_success(resp).await?.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        debug!("api.post {}", path);
        let resp = self.request(Method::POST, path)?.json(body).send().await?;
        Ok(Self::expect_success(resp).await?.json().await?)
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        debug!("api.put {}", path);
        let resp = self.request(Method::PUT, path)?.json(body).send().await?;
        Ok(Self::expect_success(resp).await?.json().await?)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        debug!("api.delete {}", path);
        let resp = self.request(Method::DELETE, path)?.send().await?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    // ---- auth ----

    /// POST /api/auth/login. Returns the raw identity payload; the session
    /// store owns normalization. Every rejection reads the same on purpose:
    /// the console never distinguishes wrong-password from unknown-user.
    pub async fn login(&self, creds: &Credentials) -> Result<Value> {
        debug!("api.login {}", creds.email);
        let resp = self
            .request(Method::POST, "/api/auth/login")?
            .json(creds)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(AppError::auth("invalid_credentials", "invalid email or password").into());
        }
        Ok(resp.json().await?)
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<Value> {
        self.post_json("/api/auth/register", req).await
    }

    pub async fn send_otp(&self, email: &str) -> Result<()> {
        let path = format!("/api/auth/send-otp?email={}", urlencoding::encode(email));
        let resp = self.request(Method::GET, &path)?.send().await?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<()> {
        let resp = self
            .request(Method::POST, "/api/auth/verify-otp")?
            .json(&json!({ "email": email, "otp": otp }))
            .send()
            .await?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    // ---- dashboard & company ----

    pub async fn dashboard_stats(&self) -> Result<Value> {
        self.get_json("/api/dashboard/stats").await
    }

    pub async fn company_stats(&self) -> Result<Value> {
        self.get_json("/api/company/stats").await
    }

    // ---- projects ----

    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.get_json("/api/projects").await
    }

    pub async fn create_project(&self, p: &Project) -> Result<Project> {
        self.post_json("/api/projects", p).await
    }

    pub async fn update_project(&self, id: i64, p: &Project) -> Result<Project> {
        self.put_json(&format!("/api/projects/{}", id), p).await
    }

    pub async fn delete_project(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/projects/{}", id)).await
    }

    // ---- employees ----

    pub async fn employees(&self) -> Result<Vec<Employee>> {
        self.get_json("/api/employees").await
    }

    pub async fn create_employee(&self, e: &Employee) -> Result<Employee> {
        self.post_json("/api/employees", e).await
    }

    pub async fn update_employee(&self, id: i64, e: &Employee) -> Result<Employee> {
        self.put_json(&format!("/api/employees/{}", id), e).await
    }

    pub async fn delete_employee(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/employees/{}", id)).await
    }

    // ---- managers ----

    pub async fn managers(&self) -> Result<Value> {
        self.get_json("/api/managers").await
    }

    pub async fn register_manager(&self, payload: &Value) -> Result<Value> {
        self.post_json("/api/managers", payload).await
    }

    // ---- inventory ----

    pub async fn inventory(&self) -> Result<Vec<InventoryItem>> {
        self.get_json("/api/inventory").await
    }

    pub async fn create_inventory(&self, item: &InventoryItem) -> Result<InventoryItem> {
        self.post_json("/api/inventory", item).await
    }

    pub async fn update_inventory(&self, id: i64, item: &InventoryItem) -> Result<InventoryItem> {
        self.put_json(&format!("/api/inventory/{}", id), item).await
    }

    pub async fn delete_inventory(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/inventory/{}", id)).await
    }

    // ---- tasks (read-only from this client) ----

    pub async fn tasks(&self) -> Result<Vec<Task>> {
        self.get_json("/api/tasks").await
    }
}
