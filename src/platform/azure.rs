// src/platform/azure.rs

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::config::PlatformConfig;
use crate::errors::{PlatformError, Result};
use crate::models::{EvaluationRun, MonitoringRun};
use crate::platform::AiPlatform;
use crate::platform::credential::CredentialProvider;

/// Client for the evaluation and monitoring endpoints of an AI project.
pub struct AzureAiProjectClient {
    client: Client,
    endpoint: String,
    api_version: String,
    credential: Arc<CredentialProvider>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateEvaluationRequest<'a> {
    model_id: &'a str,
    dataset_id: &'a str,
    metrics: &'a [&'a str],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMonitoringRequest<'a> {
    model_id: &'a str,
    metrics: &'a [&'a str],
}

impl AzureAiProjectClient {
    /// Creates a client with its own HTTP connection pool and credential provider.
    pub fn from_config(config: &PlatformConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(format!("model-eval-api/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let credential = Arc::new(CredentialProvider::new(client.clone(), config.credential.clone()));

        Ok(Self::new(
            client,
            config.endpoint.clone(),
            config.api_version.clone(),
            credential,
        ))
    }

    pub fn new(
        client: Client,
        endpoint: String,
        api_version: String,
        credential: Arc<CredentialProvider>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_version,
            credential,
        }
    }

    /// Appends path segments to the endpoint. Each segment is percent-encoded
    /// on its own, so caller-supplied ids can never add path levels, a query
    /// or a fragment.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| s.is_empty() || **s == "." || **s == "..") {
            return Err(PlatformError::InvalidIdentifier(bad.to_string()));
        }

        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            PlatformError::Config(format!("Invalid platform endpoint '{}': {}", self.endpoint, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| PlatformError::Config(format!("Platform endpoint '{}' cannot take a path", self.endpoint)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a prepared request and decodes the JSON body.
    async fn send<T: DeserializeOwned>(&self, operation: &str, request: RequestBuilder) -> Result<T> {
        let request = request
            .query(&[("api-version", self.api_version.as_str())])
            .header("x-ms-client-request-id", Uuid::new_v4().to_string());
        let request = self.credential.authorize(request).await?;

        let start = Instant::now();
        let resp = request.send().await?;
        let status = resp.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        log::debug!("{} -> {} ({}ms)", operation, status, latency_ms);

        if !status.is_success() {
            let error_body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            return Err(PlatformError::ApiError {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let body = resp.text().await?;
        let value: Value = serde_json::from_str(&body).map_err(|e| {
            PlatformError::UnexpectedResponse(format!("{} returned {}: {}", operation, e, body))
        })?;

        if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
            return Err(PlatformError::ApiResponse(error.to_string()));
        }

        serde_json::from_value(value).map_err(|e| {
            PlatformError::UnexpectedResponse(format!("{} returned {}: {}", operation, e, body))
        })
    }
}

#[async_trait]
impl AiPlatform for AzureAiProjectClient {
    async fn create_evaluation(
        &self,
        model_id: &str,
        dataset_id: &str,
        metrics: &[&str],
    ) -> Result<EvaluationRun> {
        let body = CreateEvaluationRequest {
            model_id,
            dataset_id,
            metrics,
        };
        let request = self
            .client
            .post(self.url(&["evaluations", "create"])?)
            .json(&body);
        self.send("create_evaluation", request).await
    }

    async fn get_evaluation(&self, evaluation_id: &str) -> Result<EvaluationRun> {
        let request = self
            .client
            .get(self.url(&["evaluations", "runs", evaluation_id])?);
        self.send("get_evaluation", request).await
    }

    async fn create_monitoring(&self, model_id: &str, metrics: &[&str]) -> Result<MonitoringRun> {
        let body = CreateMonitoringRequest { model_id, metrics };
        let request = self
            .client
            .post(self.url(&["monitoring", "create"])?)
            .json(&body);
        self.send("create_monitoring", request).await
    }

    async fn get_metrics(&self, model_id: &str, start_time: &str) -> Result<Map<String, Value>> {
        let request = self
            .client
            .get(self.url(&["monitoring", "models", model_id, "metrics"])?)
            .query(&[("startTime", start_time)]);
        self.send("get_metrics", request).await
    }
}
