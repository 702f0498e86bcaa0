//! REST API client.
//!
//! One shared `reqwest::Client` plus the session context. Each resource area
//! (auth, contact, extra, team) adds its endpoints to `ApiClient` in its own
//! file, declaring which cache tags a query provides and a mutation
//! invalidates.

mod auth;
mod cache;
mod contact;
mod extra;
mod team;

pub use cache::*;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use crate::models::ApiEnvelope;
use crate::session::SessionContext;

/// Result of a mutation whose `data` the caller does not interpret.
pub type MutationResult = Result<ApiEnvelope<serde_json::Value>, AppError>;

/// Client for the fleet reservation API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionContext>,
    cache: Arc<TagCache>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<SessionContext>,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            cache: Arc::new(TagCache::default()),
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn cache(&self) -> &TagCache {
        &self.cache
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request, attaching the bearer token when signed in.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and unwrap the `{ success, message, data }` envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ApiEnvelope<T>, AppError> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(&bytes)
                .ok()
                .and_then(|envelope| envelope.message);
            tracing::warn!("API request failed with {}: {:?}", status, message);
            return Err(AppError::Remote { status, message });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes)?;
        if !envelope.success {
            tracing::warn!("API rejected request: {:?}", envelope.message);
            return Err(AppError::Rejected(envelope.message));
        }
        Ok(envelope)
    }

    /// GET `path`, serving from the cache when a fresh entry exists.
    async fn query<T: DeserializeOwned>(
        &self,
        path: &str,
        provides: &[CacheTag],
    ) -> Result<ApiEnvelope<T>, AppError> {
        let epoch = self.session.epoch();
        if let Some(body) = self.cache.get(path, epoch).await {
            tracing::debug!("Cache hit for {}", path);
            return decode_cached(body);
        }

        tracing::debug!("GET {}", path);
        let envelope: ApiEnvelope<serde_json::Value> =
            self.send(self.request(Method::GET, path)).await?;
        let body = serde_json::json!({
            "success": envelope.success,
            "message": envelope.message,
            "data": envelope.data,
            "meta": envelope.meta,
        });
        self.cache.insert(path, epoch, provides, body.clone()).await;
        decode_cached(body)
    }

    /// Send a mutation and drop cached queries carrying any of `invalidates`.
    async fn mutate<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        invalidates: &[CacheTag],
    ) -> Result<ApiEnvelope<T>, AppError> {
        let envelope = self.send(builder).await?;
        let dropped = self.cache.invalidate(invalidates).await;
        tracing::debug!("Invalidated {} cached queries for {:?}", dropped, invalidates);
        Ok(envelope)
    }
}

fn decode_cached<T: DeserializeOwned>(body: serde_json::Value) -> Result<ApiEnvelope<T>, AppError> {
    Ok(serde_json::from_value(body)?)
}
