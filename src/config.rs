// src/config.rs
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{PlatformError, Result};

pub const DEFAULT_API_VERSION: &str = "2024-07-01-preview";
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Parsed form of an AI project connection string:
/// `<host>;<subscription_id>;<resource_group>;<project_name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConnection {
    pub host: String,
    pub subscription_id: String,
    pub resource_group: String,
    pub project_name: String,
}

impl ProjectConnection {
    /// Base URL all platform operations hang off.
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/agents/v1.0/subscriptions/{}/resourceGroups/{}/providers/Microsoft.MachineLearningServices/workspaces/{}",
            self.host, self.subscription_id, self.resource_group, self.project_name
        )
    }
}

impl FromStr for ProjectConnection {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(';').map(str::trim).collect();
        match parts.as_slice() {
            [host, sub, rg, project] if parts.iter().all(|p| !p.is_empty()) => {
                let host = host
                    .trim_start_matches("https://")
                    .trim_end_matches('/')
                    .to_string();
                Ok(ProjectConnection {
                    host,
                    subscription_id: sub.to_string(),
                    resource_group: rg.to_string(),
                    project_name: project.to_string(),
                })
            }
            _ => Err(PlatformError::Config(
                "Project connection string must have the form <host>;<subscription_id>;<resource_group>;<project_name>".to_string(),
            )),
        }
    }
}

/// How requests to the platform are authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialConfig {
    /// Entra ID service principal; tokens are fetched and cached.
    ClientSecret {
        tenant_id: String,
        client_id: String,
        client_secret: String,
        authority_host: String,
    },
    AccessToken(String),
    ApiKey(String),
}

#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub endpoint: String,
    pub api_version: String,
    pub http_timeout: Duration,
    pub credential: CredentialConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingConfig {
    /// Delay between two status reads of a running evaluation.
    pub interval: Duration,
    /// Upper bound on the total time spent waiting for an evaluation.
    pub timeout: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            timeout: Duration::from_secs(30 * 60),
        }
    }
}

/// High-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub platform: PlatformConfig,
    pub server: ServerConfig,
    pub polling: PollingConfig,
}

/// Optional TOML overlay, read from `CONFIG_FILE`.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServer,
    #[serde(default)]
    pub platform: FilePlatform,
    #[serde(default)]
    pub polling: FilePolling,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct FileServer {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct FilePlatform {
    pub endpoint: Option<String>,
    pub api_version: Option<String>,
    pub http_timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct FilePolling {
    pub interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

impl AppConfig {
    /// Load configuration from environment variables, layered over the
    /// TOML file named by `CONFIG_FILE` when set.
    pub fn from_env() -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok();
        let file = match lookup("CONFIG_FILE") {
            Some(path) => FileConfig::from_path(&path)?,
            None => FileConfig::default(),
        };
        Self::from_sources(&file, lookup)
    }

    /// Build the configuration from a file overlay and a variable lookup.
    /// Variables win over file values, which win over defaults.
    pub fn from_sources<F>(file: &FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoint = match var("AI_PLATFORM_ENDPOINT").or_else(|| file.platform.endpoint.clone()) {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => {
                let conn_str = var("PROJECT_CONNECTION_STRING").ok_or_else(|| {
                    PlatformError::Config(
                        "No platform configured. Please set PROJECT_CONNECTION_STRING or AI_PLATFORM_ENDPOINT.".to_string(),
                    )
                })?;
                conn_str.parse::<ProjectConnection>()?.endpoint()
            }
        };

        let api_version = var("AI_PLATFORM_API_VERSION")
            .or_else(|| file.platform.api_version.clone())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let http_timeout = Duration::from_secs(
            parse_var(&var, "HTTP_TIMEOUT_SECS")?
                .or(file.platform.http_timeout_secs)
                .unwrap_or(30),
        );

        let credential = credential_from(&var)?;

        let server = ServerConfig {
            host: var("HOST")
                .or_else(|| file.server.host.clone())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(&var, "PORT")?.or(file.server.port).unwrap_or(5000),
        };

        let defaults = PollingConfig::default();
        let polling = PollingConfig {
            interval: parse_var(&var, "EVALUATION_POLL_INTERVAL_SECS")?
                .or(file.polling.interval_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.interval),
            timeout: parse_var(&var, "EVALUATION_TIMEOUT_SECS")?
                .or(file.polling.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        };

        if polling.interval.is_zero() {
            return Err(PlatformError::Config(
                "EVALUATION_POLL_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(AppConfig {
            platform: PlatformConfig {
                endpoint,
                api_version,
                http_timeout,
                credential,
            },
            server,
            polling,
        })
    }
}

/// Resolve credentials in the same order as the platform's default chain:
/// service principal, then a raw token, then an API key.
fn credential_from<F>(var: &F) -> Result<CredentialConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let (Some(tenant_id), Some(client_id), Some(client_secret)) = (
        var("AZURE_TENANT_ID"),
        var("AZURE_CLIENT_ID"),
        var("AZURE_CLIENT_SECRET"),
    ) {
        let authority_host = var("AZURE_AUTHORITY_HOST")
            .unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_string())
            .trim_end_matches('/')
            .to_string();
        return Ok(CredentialConfig::ClientSecret {
            tenant_id,
            client_id,
            client_secret,
            authority_host,
        });
    }

    if let Some(token) = var("AZURE_ACCESS_TOKEN") {
        return Ok(CredentialConfig::AccessToken(token));
    }

    if let Some(key) = var("AZURE_AI_API_KEY") {
        return Ok(CredentialConfig::ApiKey(key));
    }

    Err(PlatformError::Config(
        "No credentials configured. Please set AZURE_TENANT_ID/AZURE_CLIENT_ID/AZURE_CLIENT_SECRET, AZURE_ACCESS_TOKEN or AZURE_AI_API_KEY.".to_string(),
    ))
}

fn parse_var<F, T>(var: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| PlatformError::Config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(None),
    }
}
