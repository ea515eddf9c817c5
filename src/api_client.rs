// src/api_client.rs
//! HTTP client for the inventory REST backend.
//!
//! One attempt per call: no retries. A non-success status becomes a
//! `ConsoleError` carrying the backend's `{"error": ...}` message when it sent one.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::BackendConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::inventory::{Draft, InventoryEntity};
use crate::models::*;

#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> ConsoleResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConsoleError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    // ==================== INVENTORY (generic) ====================

    pub async fn list<E: InventoryEntity>(&self) -> ConsoleResult<Vec<E>> {
        self.get_json(E::RESOURCE, &format!("Failed to load {}", E::RESOURCE)).await
    }

    /// Not-found covers a 404, an `{"error": ...}` payload and an empty body.
    #[tracing::instrument(skip(self), fields(resource = E::RESOURCE))]
    pub async fn get<E: InventoryEntity>(&self, id: i64) -> ConsoleResult<E> {
        let url = self.url(&format!("{}/{}", E::RESOURCE, id));
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ConsoleError::not_found(E::LABEL));
        }
        if !status.is_success() {
            return Err(ConsoleError::Backend {
                status: status.as_u16(),
                message: error_field(&body).unwrap_or_else(|| format!("Failed to load {}", E::LABEL)),
            });
        }

        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if body.trim().is_empty() => return Err(ConsoleError::not_found(E::LABEL)),
            Err(e) => return Err(e.into()),
        };
        if value.is_null() || value.get("error").is_some() {
            return Err(ConsoleError::not_found(E::LABEL));
        }

        Ok(serde_json::from_value(value)?)
    }

    pub async fn save<D: Draft>(&self, draft: &D) -> ConsoleResult<SaveReceipt> {
        let url = self.url(D::Entity::RESOURCE);
        log::debug!(
            "POST {} ({})",
            url,
            if draft.is_update() { "update" } else { "create" }
        );

        let response = self.http.post(&url).json(draft).send().await?;
        let response = ensure_success(response, "Failed to save").await?;
        Ok(receipt(response).await)
    }

    pub async fn delete<E: InventoryEntity>(&self, id: i64) -> ConsoleResult<()> {
        self.delete_path(&format!("{}/{}", E::RESOURCE, id)).await
    }

    // ==================== LOCATIONS ====================

    pub async fn list_locations(&self) -> ConsoleResult<Vec<Location>> {
        self.get_json("locations", "Failed to load locations").await
    }

    // ==================== ORDERS ====================

    pub async fn list_orders(&self) -> ConsoleResult<Vec<Order>> {
        self.get_json("orders", "Failed to load orders").await
    }

    pub async fn create_order(&self, draft: &OrderDraft) -> ConsoleResult<SaveReceipt> {
        let url = self.url("orders");
        log::debug!("POST {}", url);

        let response = self.http.post(&url).json(draft).send().await?;
        let response = ensure_success(response, "Failed to save order").await?;
        Ok(receipt(response).await)
    }

    pub async fn update_order(&self, id: i64, draft: &OrderDraft) -> ConsoleResult<SaveReceipt> {
        let url = self.url(&format!("orders/{}", id));
        log::debug!("PUT {}", url);

        let response = self.http.put(&url).json(draft).send().await?;
        let response = ensure_success(response, "Failed to update order").await?;
        Ok(receipt(response).await)
    }

    pub async fn delete_order(&self, id: i64) -> ConsoleResult<()> {
        self.delete_path(&format!("orders/{}", id)).await
    }

    // ==================== ASSISTED FEATURES ====================

    /// Natural-language search. An `error` field fails the call even on 200.
    pub async fn ai_search(&self, query: &str) -> ConsoleResult<AiSearchResponse> {
        let body = AssistQuery { query: query.to_string() };
        let parsed: AiSearchResponse = self.post_assist("ai-search", &body, "AI search failed").await?;
        match parsed.error {
            Some(error) => Err(ConsoleError::assist(None, error)),
            None => Ok(parsed),
        }
    }

    pub async fn check_hazards(&self) -> ConsoleResult<HazardScanResponse> {
        let url = self.url("check-hazards");
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ConsoleError::assist(
                Some(status.as_u16()),
                error_field(&body).unwrap_or_else(|| "Scan failed".to_string()),
            ));
        }

        let parsed: HazardScanResponse = serde_json::from_str(&body)?;
        match parsed.error {
            Some(error) => Err(ConsoleError::assist(None, error)),
            None => Ok(parsed),
        }
    }

    pub async fn ai_lookup(&self, name: &str) -> ConsoleResult<LookupSuggestion> {
        let body = AssistQuery { query: name.to_string() };
        let parsed: LookupSuggestion = self.post_assist("ai-lookup", &body, "AI lookup failed").await?;
        match parsed.error {
            Some(error) => Err(ConsoleError::assist(None, error)),
            None => Ok(parsed),
        }
    }

    // ==================== HELPERS ====================

    async fn get_json<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> ConsoleResult<T> {
        let url = self.url(path);
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let response = ensure_success(response, fallback).await?;
        Ok(response.json().await?)
    }

    async fn delete_path(&self, path: &str) -> ConsoleResult<()> {
        let url = self.url(path);
        log::debug!("DELETE {}", url);

        let response = self.http.delete(&url).send().await?;
        ensure_success(response, "Failed to delete").await?;
        Ok(())
    }

    async fn post_assist<B, T>(&self, path: &str, body: &B, fallback: &str) -> ConsoleResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("POST {}", url);

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ConsoleError::assist(
                Some(status.as_u16()),
                error_field(&text).unwrap_or_else(|| fallback.to_string()),
            ));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// `{"error": "..."}` → the message.
fn error_field(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}

async fn ensure_success(response: Response, fallback: &str) -> ConsoleResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_field(&body).unwrap_or_else(|| fallback.to_string());
    log::warn!("Backend rejected request ({}): {}", status, message);

    Err(ConsoleError::Backend {
        status: status.as_u16(),
        message,
    })
}

/// The backend's acknowledgement is informational; an odd body is not a failure.
async fn receipt(response: Response) -> SaveReceipt {
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str(&body).unwrap_or_default()
}
