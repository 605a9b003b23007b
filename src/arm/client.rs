//! ARM Client
//!
//! Main client for interacting with Azure Resource Manager, combining
//! authentication and HTTP functionality.

use super::auth::{ArmCredentials, TokenProvider};
use super::http::{ArmHttpClient, ArmResponse};
use crate::error::{Error, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const RESOURCE_MANAGER_AUDIENCE: &str = "https://management.azure.com/";
pub const GRAPH_AUDIENCE: &str = "https://graph.microsoft.com/";
pub const BATCH_AUDIENCE: &str = "https://batch.core.windows.net/";

pub const DEFAULT_RESOURCE_MANAGER_ENDPOINT: &str = "https://management.azure.com";
pub const DEFAULT_GRAPH_ENDPOINT: &str = "https://graph.microsoft.com";

/// Client behaviour knobs, passed explicitly to [`ArmClient::new`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientOptions {
    pub resource_manager_endpoint: String,
    pub graph_endpoint: String,
    pub request_timeout_secs: u64,
    /// Wait before the first long-running operation poll
    pub long_running_initial_delay_ms: u64,
    /// Wait between long-running operation polls
    pub long_running_retry_delay_ms: u64,
    pub long_running_max_polls: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            resource_manager_endpoint: DEFAULT_RESOURCE_MANAGER_ENDPOINT.to_string(),
            graph_endpoint: DEFAULT_GRAPH_ENDPOINT.to_string(),
            request_timeout_secs: 100,
            long_running_initial_delay_ms: 2_000,
            long_running_retry_delay_ms: 5_000,
            long_running_max_polls: 120,
        }
    }
}

impl ClientOptions {
    /// Options pointing both endpoints at one base URL with no polling delays
    pub fn for_endpoint(base: &str) -> Self {
        Self {
            resource_manager_endpoint: base.trim_end_matches('/').to_string(),
            graph_endpoint: base.trim_end_matches('/').to_string(),
            long_running_initial_delay_ms: 0,
            long_running_retry_delay_ms: 0,
            long_running_max_polls: 5,
            ..Self::default()
        }
    }
}

/// Main ARM client
#[derive(Clone)]
pub struct ArmClient {
    pub credentials: ArmCredentials,
    pub http: ArmHttpClient,
    pub subscription_id: String,
    options: ClientOptions,
}

impl ArmClient {
    pub fn new(
        subscription_id: &str,
        provider: Arc<dyn TokenProvider>,
        options: ClientOptions,
    ) -> Result<Self> {
        let http = ArmHttpClient::new(&options)?;

        Ok(Self {
            credentials: ArmCredentials::new(provider),
            http,
            subscription_id: subscription_id.to_string(),
            options,
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    async fn token(&self, audience: &str) -> Result<String> {
        self.credentials
            .get_token(audience)
            .await
            .map_err(|e| Error::Authentication(format!("{e:#}")))
    }

    /// Send a request to an ARM URL
    pub async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<ArmResponse> {
        let token = self.token(RESOURCE_MANAGER_AUDIENCE).await?;
        self.http.execute(method, url, &token, body).await
    }

    /// Send a request with a token for a different audience (Graph, Batch)
    pub async fn send_with_audience(
        &self,
        audience: &str,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<ArmResponse> {
        let token = self.token(audience).await?;
        self.http.execute(method, url, &token, body).await
    }

    pub async fn get(&self, url: &str) -> Result<Value> {
        Ok(self.send(Method::GET, url, None).await?.body)
    }

    pub async fn put(&self, url: &str, body: &Value) -> Result<ArmResponse> {
        self.send(Method::PUT, url, Some(body)).await
    }

    pub async fn patch(&self, url: &str, body: &Value) -> Result<ArmResponse> {
        self.send(Method::PATCH, url, Some(body)).await
    }

    pub async fn post(&self, url: &str, body: Option<&Value>) -> Result<ArmResponse> {
        self.send(Method::POST, url, body).await
    }

    pub async fn delete(&self, url: &str) -> Result<ArmResponse> {
        self.send(Method::DELETE, url, None).await
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Build an ARM URL for a path starting with `/`
    pub fn arm_url(&self, path: &str, api_version: &str) -> String {
        let sep = if path.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}api-version={}",
            self.options.resource_manager_endpoint, path, sep, api_version
        )
    }

    /// `/subscriptions/{sub}` scope path
    pub fn subscription_path(&self) -> String {
        format!("/subscriptions/{}", self.subscription_id)
    }

    /// Provider collection path at subscription scope
    pub fn subscription_provider_path(&self, provider: &str, resource_type: &str) -> String {
        format!(
            "{}/providers/{}/{}",
            self.subscription_path(),
            provider,
            resource_type
        )
    }

    /// Provider collection path inside a resource group
    pub fn resource_group_provider_path(
        &self,
        resource_group: &str,
        provider: &str,
        resource_type: &str,
    ) -> String {
        format!(
            "{}/resourceGroups/{}/providers/{}/{}",
            self.subscription_path(),
            urlencoding::encode(resource_group),
            provider,
            resource_type
        )
    }

    /// Microsoft Graph URL for a path starting with `/`
    pub fn graph_url(&self, path: &str) -> String {
        format!("{}/v1.0{}", self.options.graph_endpoint, path)
    }
}
