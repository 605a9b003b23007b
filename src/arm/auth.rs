//! Azure Authentication
//!
//! Acquires bearer tokens for Azure Resource Manager, Microsoft Graph and the
//! Batch data plane. Tokens come from `AZURE_ACCESS_TOKEN`, from the Azure CLI,
//! or from a fixed value (tests), and are cached per audience.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use futures::future::BoxFuture;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Environment variable holding a pre-acquired bearer token
pub const ACCESS_TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";

/// Token expiry buffer - refresh tokens this much before they actually expire
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Default token TTL if we can't determine expiry (conservative: 30 minutes)
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// A bearer token and how long it stays usable
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: Option<Duration>,
}

/// Source of bearer tokens for a given audience (resource URI)
pub trait TokenProvider: Send + Sync {
    fn fetch_token<'a>(&'a self, audience: &'a str) -> BoxFuture<'a, Result<AccessToken>>;

    fn name(&self) -> &'static str;
}

/// Fixed token, used for `AZURE_ACCESS_TOKEN` and for tests
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn fetch_token<'a>(&'a self, _audience: &'a str) -> BoxFuture<'a, Result<AccessToken>> {
        Box::pin(async move {
            Ok(AccessToken {
                token: self.token.clone(),
                expires_in: None,
            })
        })
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Tokens from `az account get-access-token`
pub struct AzureCliTokenProvider;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliToken {
    access_token: String,
    /// Local time, e.g. `2024-01-01 12:00:00.000000`
    #[serde(default)]
    expires_on: Option<String>,
    /// Unix epoch seconds (newer CLI versions)
    #[serde(default, rename = "expires_on")]
    expires_on_epoch: Option<i64>,
}

impl CliToken {
    fn expires_in(&self) -> Option<Duration> {
        let expires_at = match self.expires_on_epoch {
            Some(epoch) => DateTime::<Utc>::from_timestamp(epoch, 0)?,
            None => {
                let raw = self.expires_on.as_deref()?;
                let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok()?;
                naive
                    .and_local_timezone(chrono::Local)
                    .single()?
                    .with_timezone(&Utc)
            }
        };
        (expires_at - Utc::now()).to_std().ok()
    }
}

impl TokenProvider for AzureCliTokenProvider {
    fn fetch_token<'a>(&'a self, audience: &'a str) -> BoxFuture<'a, Result<AccessToken>> {
        Box::pin(async move {
            tracing::debug!("Requesting token from Azure CLI for {}", audience);

            let output = tokio::process::Command::new("az")
                .args([
                    "account",
                    "get-access-token",
                    "--resource",
                    audience,
                    "--output",
                    "json",
                ])
                .output()
                .await
                .context("Failed to run 'az'. Install the Azure CLI or set AZURE_ACCESS_TOKEN")?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                tracing::warn!("az account get-access-token failed: {}", stderr.trim());
                return Err(anyhow::anyhow!(
                    "Azure CLI could not provide a token. Run 'az login'"
                ));
            }

            let token: CliToken = serde_json::from_slice(&output.stdout)
                .context("Failed to parse Azure CLI token output")?;
            let expires_in = token.expires_in();

            Ok(AccessToken {
                token: token.access_token,
                expires_in,
            })
        })
    }

    fn name(&self) -> &'static str {
        "azure-cli"
    }
}

/// Pick a provider from the environment: `AZURE_ACCESS_TOKEN` wins over the CLI
pub fn default_provider() -> Arc<dyn TokenProvider> {
    match std::env::var(ACCESS_TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => {
            Arc::new(StaticTokenProvider::new(token.trim().to_string()))
        }
        _ => Arc::new(AzureCliTokenProvider),
    }
}

/// Azure credentials holder with per-audience token caching
#[derive(Clone)]
pub struct ArmCredentials {
    provider: Arc<dyn TokenProvider>,
    token_cache: Arc<RwLock<HashMap<String, CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

impl ArmCredentials {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            provider,
            token_cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get an access token for the given audience
    pub async fn get_token(&self, audience: &str) -> Result<String> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.get(audience) {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token for {} expired, fetching new token", audience);
            }
        }

        let fresh = self
            .provider
            .fetch_token(audience)
            .await
            .with_context(|| format!("Failed to get access token from {}", self.provider.name()))?;

        let ttl = fresh.expires_in.unwrap_or(DEFAULT_TOKEN_TTL);
        let expires_at = Instant::now() + ttl.saturating_sub(TOKEN_EXPIRY_BUFFER);

        {
            let mut cache = self.token_cache.write().await;
            cache.insert(
                audience.to_string(),
                CachedToken {
                    token: fresh.token.clone(),
                    expires_at,
                },
            );
        }

        tracing::debug!(
            "New token for {} cached, expires in ~{} minutes",
            audience,
            ttl.saturating_sub(TOKEN_EXPIRY_BUFFER).as_secs() / 60
        );

        Ok(fresh.token)
    }

    /// Drop every cached token
    pub async fn clear(&self) {
        self.token_cache.write().await.clear();
    }
}

/// Get the Azure CLI configuration directory
pub fn get_azure_config_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("AZURE_CONFIG_DIR") {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|p| p.join(".azure"))
}

/// Validate a subscription ID (must be a GUID)
pub fn validate_subscription_id(subscription: &str) -> bool {
    uuid::Uuid::parse_str(subscription).is_ok()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliProfile {
    #[serde(default)]
    subscriptions: Vec<CliSubscription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliSubscription {
    id: String,
    #[serde(default)]
    is_default: bool,
}

/// Read the default subscription from the environment or the Azure CLI profile
pub fn get_default_subscription() -> Option<String> {
    if let Ok(subscription) = std::env::var("AZURE_SUBSCRIPTION_ID") {
        if validate_subscription_id(&subscription) {
            return Some(subscription);
        }
        tracing::warn!("Invalid subscription ID format in AZURE_SUBSCRIPTION_ID");
    }

    let profile_path = get_azure_config_dir()?.join("azureProfile.json");
    let content = std::fs::read_to_string(&profile_path).ok()?;
    default_subscription_from_profile(&content)
}

fn default_subscription_from_profile(content: &str) -> Option<String> {
    // The CLI writes this file with a UTF-8 BOM
    let content = content.trim_start_matches('\u{feff}');
    let profile: CliProfile = match serde_json::from_str(content) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("Failed to parse azureProfile.json: {}", e);
            return None;
        }
    };

    profile
        .subscriptions
        .into_iter()
        .find(|s| s.is_default)
        .map(|s| s.id)
        .filter(|id| validate_subscription_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl TokenProvider for CountingProvider {
        fn fetch_token<'a>(&'a self, audience: &'a str) -> BoxFuture<'a, Result<AccessToken>> {
            Box::pin(async move {
                let n = self.calls.fetch_add(1, Ordering::SeqCst);
                Ok(AccessToken {
                    token: format!("{audience}-{n}"),
                    expires_in: Some(Duration::from_secs(3600)),
                })
            })
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_tokens_cached_per_audience() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let creds = ArmCredentials::new(provider.clone());

        let a1 = creds.get_token("https://management.azure.com/").await.unwrap();
        let a2 = creds.get_token("https://management.azure.com/").await.unwrap();
        let g1 = creds.get_token("https://graph.microsoft.com/").await.unwrap();

        assert_eq!(a1, a2);
        assert_ne!(a1, g1);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

        creds.clear().await;
        let a3 = creds.get_token("https://management.azure.com/").await.unwrap();
        assert_ne!(a1, a3);
    }

    #[test]
    fn test_static_provider_ignores_audience() {
        let provider = StaticTokenProvider::new("abc");
        let arm = tokio_test::block_on(provider.fetch_token("https://management.azure.com/")).unwrap();
        let batch = tokio_test::block_on(provider.fetch_token("https://batch.core.windows.net/")).unwrap();
        assert_eq!(arm.token, "abc");
        assert_eq!(batch.token, "abc");
        assert_eq!(arm.expires_in, None);
    }

    #[test]
    fn test_default_subscription_from_profile_with_bom() {
        let content = "\u{feff}{\"subscriptions\": [
            {\"id\": \"11111111-1111-1111-1111-111111111111\", \"isDefault\": false},
            {\"id\": \"22222222-2222-2222-2222-222222222222\", \"isDefault\": true}
        ]}";
        assert_eq!(
            default_subscription_from_profile(content).as_deref(),
            Some("22222222-2222-2222-2222-222222222222")
        );
    }

    #[test]
    fn test_default_subscription_rejects_non_guid() {
        let content = r#"{"subscriptions": [{"id": "not-a-guid", "isDefault": true}]}"#;
        assert_eq!(default_subscription_from_profile(content), None);
    }

    #[test]
    fn test_cli_token_epoch_expiry() {
        let token = CliToken {
            access_token: "t".to_string(),
            expires_on: None,
            expires_on_epoch: Some(Utc::now().timestamp() + 600),
        };
        let expires_in = token.expires_in().unwrap();
        assert!(expires_in <= Duration::from_secs(600));
        assert!(expires_in > Duration::from_secs(500));
    }
}
