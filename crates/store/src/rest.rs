//! REST implementation of [`ManagementStore`].
//!
//! `RestStore` wraps a `reqwest::Client` and translates every trait
//! method into the corresponding HTTP call against the site provider's
//! API. Each call is exactly one request: there is no retry or
//! back-off, so a transient failure surfaces to the caller unchanged.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use sw_domain::config::ProviderConfig;
use sw_domain::error::{Error, Result};

use crate::auth;
use crate::provider::ManagementStore;
use crate::types::{
    ClassSchema, ExecRequest, ExecResponse, ManagedObject, PutResponse, QueryRequest,
    QueryResponse,
};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST-based client for one site's object store.
///
/// Created once and reused for the lifetime of the process. The
/// underlying `reqwest::Client` maintains a connection pool.
#[derive(Debug, Clone)]
pub struct RestStore {
    http: Client,
    base_url: String,
    site: String,
    api_key: Option<String>,
}

impl RestStore {
    /// Build a new client from the shared `ProviderConfig`.
    ///
    /// Resolves the API key up front (see [`auth::resolve_api_key`]) so
    /// a broken credential setup fails here, not on the first call.
    pub fn new(cfg: &ProviderConfig) -> Result<Self> {
        let api_key = auth::resolve_api_key(&cfg.auth)?;

        let mut builder = Client::builder();
        if cfg.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(cfg.timeout_ms));
        }
        let http = builder.build().map_err(|e| Error::Http(e.to_string()))?;

        let base_url = cfg.base_url.trim_end_matches('/').to_owned();

        Ok(Self {
            http,
            base_url,
            site: cfg.site.clone(),
            api_key,
        })
    }

    /// The site code all requests are scoped to.
    pub fn site(&self) -> &str {
        &self.site
    }

    // ── request helpers ──────────────────────────────────────────────

    /// Decorate a `RequestBuilder` with the standard client headers.
    fn decorate(&self, rb: RequestBuilder) -> RequestBuilder {
        let trace_id = Uuid::new_v4().to_string();
        let mut rb = rb
            .header("X-Client-Type", "sitewrench")
            .header("X-Trace-Id", &trace_id);

        if let Some(ref key) = self.api_key {
            rb = rb.header("X-Api-Key", key);
        }
        rb
    }

    /// Build the full URL for a site-scoped path like `/schema/Package`.
    fn url(&self, path: &str) -> String {
        format!("{}/sites/{}{}", self.base_url, self.site, path)
    }

    /// Send one request and map the outcome onto the domain errors.
    ///
    /// * 401 / 403 → [`Error::Auth`]
    /// * 404 → [`Error::NotFound`]
    /// * other 4xx → [`Error::Http`] (client errors are permanent)
    /// * 5xx → [`Error::StoreUnavailable`]
    /// * timeout / connection failure → [`Error::Timeout`] / [`Error::StoreUnavailable`]
    async fn execute(&self, endpoint: &str, rb: RequestBuilder) -> Result<Response> {
        let start = Instant::now();
        let result = self.decorate(rb).send().await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::debug!(endpoint, duration_ms, error = %e, "store call failed");
                return Err(from_reqwest(e));
            }
        };

        let status = resp.status();
        tracing::debug!(endpoint, status = status.as_u16(), duration_ms, "store call");

        if status.is_success() {
            return Ok(resp);
        }

        let code = status.as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Error::Auth(format!("{endpoint} auth failed ({code}): {body}"))
            }
            StatusCode::NOT_FOUND => Error::NotFound(format!("{endpoint}: {body}")),
            s if s.is_server_error() => {
                Error::StoreUnavailable(format!("{endpoint} returned {code}: {body}"))
            }
            _ => Error::Http(format!("{endpoint} returned {code}: {body}")),
        })
    }

    /// Read and deserialize a response body.
    async fn read_json<T: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<T> {
        let body = resp.text().await.map_err(from_reqwest)?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Http(format!("{endpoint}: unreadable response: {e}: {body}")))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl ManagementStore for RestStore {
    async fn create_instance(&self, class: &str) -> Result<ManagedObject> {
        let endpoint = format!("GET /schema/{class}");
        let url = self.url(&format!("/schema/{class}"));

        let resp = match self.execute(&endpoint, self.http.get(&url)).await {
            Ok(resp) => resp,
            // A class the provider does not serve means no instance can
            // be handed out, same as the store being down.
            Err(Error::NotFound(msg)) => {
                return Err(Error::StoreUnavailable(format!(
                    "class {class} not served: {msg}"
                )))
            }
            Err(e) => return Err(e),
        };

        let schema: ClassSchema = Self::read_json(&endpoint, resp).await?;
        Ok(ManagedObject::from_schema(&schema))
    }

    async fn query(&self, req: QueryRequest) -> Result<Vec<ManagedObject>> {
        let url = self.url("/query");
        let resp = self
            .execute("POST /query", self.http.post(&url).json(&req))
            .await?;

        let parsed: QueryResponse = Self::read_json("POST /query", resp).await?;
        Ok(parsed.instances)
    }

    async fn get(&self, path: &str) -> Result<ManagedObject> {
        let endpoint = format!("GET /objects/{path}");
        let url = self.url(&format!("/objects/{path}"));
        let resp = self.execute(&endpoint, self.http.get(&url)).await?;
        Self::read_json(&endpoint, resp).await
    }

    async fn put(&self, object: &ManagedObject) -> Result<PutResponse> {
        let url = self.url("/objects");
        let resp = self
            .execute("PUT /objects", self.http.put(&url).json(object))
            .await?;
        Self::read_json("PUT /objects", resp).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let endpoint = format!("DELETE /objects/{path}");
        let url = self.url(&format!("/objects/{path}"));
        self.execute(&endpoint, self.http.delete(&url)).await?;
        Ok(())
    }

    async fn exec_method(
        &self,
        path: &str,
        method: &str,
        req: ExecRequest,
    ) -> Result<ExecResponse> {
        let endpoint = format!("POST /objects/{path}/exec/{method}");
        let url = self.url(&format!("/objects/{path}/exec/{method}"));
        let resp = self
            .execute(&endpoint, self.http.post(&url).json(&req))
            .await?;
        Self::read_json(&endpoint, resp).await
    }

    async fn ping(&self) -> Result<()> {
        let url = self.url("/ping");
        self.execute("GET /ping", self.http.get(&url)).await?;
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error conversion helper
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Convert a `reqwest::Error` into a domain `Error`.
///
/// Timeouts become `Error::Timeout`, connection-level failures become
/// `Error::StoreUnavailable`, everything else becomes `Error::Http`.
pub fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else if e.is_connect() {
        Error::StoreUnavailable(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
