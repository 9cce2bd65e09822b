//! Client configuration, read from the environment.

use std::time::Duration;

use reqwest::Url;

use riskdesk_auth::AuthContext;

use crate::ClientError;

pub const API_URL_ENV: &str = "RISKDESK_API_URL";
pub const AUTH_TOKEN_ENV: &str = "RISKDESK_AUTH_TOKEN";
pub const TIMEOUT_ENV: &str = "RISKDESK_HTTP_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: Url,
    pub auth_token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            api_url: parse_base_url(api_url)?,
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let auth_token = lookup(AUTH_TOKEN_ENV).filter(|t| !t.trim().is_empty());
        let timeout = match lookup(TIMEOUT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ClientError::Config(format!("{TIMEOUT_ENV}: {e}")))?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_url: parse_base_url(&api_url)?,
            auth_token,
            timeout,
        })
    }

    /// Session built from the configured token alone.
    pub fn auth_context(&self) -> AuthContext {
        match &self.auth_token {
            Some(token) => AuthContext::with_token(token.clone()),
            None => AuthContext::anonymous(),
        }
    }
}

impl core::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url.as_str())
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ClientError::Config(format!("{API_URL_ENV}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::Config(format!(
            "{API_URL_ENV}: '{raw}' cannot be used as a base URL"
        )));
    }
    Ok(url)
}
