//! reqwest-backed implementation of the collaborator contracts.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use riskdesk_auth::{AuthContext, NewUser, User, UserChanges};
use riskdesk_core::{PolicyId, RecordId};
use riskdesk_reinsurance::RiskAllocationRecord;

use crate::api::{AdminApi, DataEnvelope, ReinsuranceApi};
use crate::{ClientConfig, ClientError};

/// HTTP client for the console backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    auth: AuthContext,
}

/// Error body shape: `{"error": "...", "message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig, auth: AuthContext) -> Result<Self, ClientError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        tracing::info!(api_url = %config.api_url, "creating console API client");

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            auth,
        })
    }

    /// Base URL joined with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("'{}' cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.auth.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request failed before a response arrived");
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or(text);

        tracing::warn!(status = status.as_u16(), reason = %message, "API rejected request");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait(?Send)]
impl AdminApi for HttpClient {
    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let url = self.endpoint(&["users"])?;
        tracing::debug!(%url, "listing users");
        let envelope: DataEnvelope<Vec<User>> = self.send_json(self.request(Method::GET, url)).await?;
        Ok(envelope.data)
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<(), ClientError> {
        let url = self.endpoint(&["users"])?;
        tracing::info!(username = %new_user.username, "creating user");
        self.send(self.request(Method::POST, url).json(new_user)).await?;
        Ok(())
    }

    async fn update_user(&self, id: &RecordId, changes: &UserChanges) -> Result<(), ClientError> {
        let url = self.endpoint(&["users", id.as_str()])?;
        tracing::info!(user_id = %id, "updating user");
        self.send(self.request(Method::PUT, url).json(changes)).await?;
        Ok(())
    }

    async fn delete_user(&self, id: &RecordId) -> Result<(), ClientError> {
        let url = self.endpoint(&["users", id.as_str()])?;
        tracing::info!(user_id = %id, "deleting user");
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl ReinsuranceApi for HttpClient {
    async fn risk_allocations(
        &self,
        policy_id: &PolicyId,
    ) -> Result<Vec<RiskAllocationRecord>, ClientError> {
        let mut url = self.endpoint(&["risk-allocations"])?;
        url.query_pairs_mut().append_pair("policyId", policy_id.as_str());
        tracing::debug!(%url, "fetching risk allocations");
        let envelope: DataEnvelope<Vec<RiskAllocationRecord>> =
            self.send_json(self.request(Method::GET, url)).await?;
        Ok(envelope.data)
    }
}
