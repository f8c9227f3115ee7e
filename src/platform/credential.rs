// src/platform/credential.rs

use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::CredentialConfig;
use crate::errors::{PlatformError, Result};

/// Scope requested for platform tokens.
pub const TOKEN_SCOPE: &str = "https://ml.azure.com/.default";

/// Tokens are refreshed this long before they actually expire.
const REFRESH_MARGIN_SECS: i64 = 300;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Attaches credentials to outgoing platform requests.
///
/// Service-principal tokens are fetched lazily and shared between requests
/// until they get close to expiry.
pub struct CredentialProvider {
    client: Client,
    config: CredentialConfig,
    cached: RwLock<Option<CachedToken>>,
}

impl CredentialProvider {
    pub fn new(client: Client, config: CredentialConfig) -> Self {
        Self {
            client,
            config,
            cached: RwLock::new(None),
        }
    }

    /// Adds the credential header to a request.
    pub async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            CredentialConfig::ApiKey(key) => Ok(request.header("api-key", key)),
            CredentialConfig::AccessToken(token) => Ok(request.bearer_auth(token)),
            CredentialConfig::ClientSecret { .. } => {
                let token = self.bearer_token().await?;
                Ok(request.bearer_auth(token))
            }
        }
    }

    async fn bearer_token(&self) -> Result<String> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.expires_at > Utc::now() {
                return Ok(cached.token.clone());
            }
        }

        let mut slot = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(cached) = slot.as_ref() {
            if cached.expires_at > Utc::now() {
                return Ok(cached.token.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let token = fresh.token.clone();
        *slot = Some(fresh);
        Ok(token)
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        let CredentialConfig::ClientSecret {
            tenant_id,
            client_id,
            client_secret,
            authority_host,
        } = &self.config
        else {
            return Err(PlatformError::Credential(
                "Token requested for a non service-principal credential".to_string(),
            ));
        };

        let url = format!("{}/{}/oauth2/v2.0/token", authority_host, tenant_id);
        log::debug!("Requesting platform token from {}", url);

        let resp = self
            .client
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("scope", TOKEN_SCOPE),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            return Err(PlatformError::Credential(format!(
                "Token request failed with status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = resp.json().await?;
        let lifetime = (token.expires_in - REFRESH_MARGIN_SECS).max(0);
        log::info!("Acquired platform token valid for {}s", token.expires_in);

        Ok(CachedToken {
            token: token.access_token,
            expires_at: Utc::now() + Duration::seconds(lifetime),
        })
    }
}
