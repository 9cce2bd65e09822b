//! Collaborator contracts the console components talk to.
//!
//! Futures are not required to be `Send`: the console runs on a
//! single-threaded event loop (the browser, or a current-thread runtime).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use riskdesk_auth::{NewUser, User, UserChanges};
use riskdesk_core::{PolicyId, RecordId};
use riskdesk_reinsurance::RiskAllocationRecord;

use crate::ClientError;

/// `{ "data": ... }` wrapper used by the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// User administration endpoints.
#[async_trait(?Send)]
pub trait AdminApi {
    /// `GET /users`
    async fn list_users(&self) -> Result<Vec<User>, ClientError>;

    /// `POST /users`
    ///
    /// Only the status matters; the body varies between deployments (bare
    /// user, `{message, user}`, or empty) and the list is refetched anyway.
    async fn create_user(&self, new_user: &NewUser) -> Result<(), ClientError>;

    /// `PUT /users/{id}`, status only as for [`AdminApi::create_user`].
    async fn update_user(&self, id: &RecordId, changes: &UserChanges) -> Result<(), ClientError>;

    /// `DELETE /users/{id}`
    async fn delete_user(&self, id: &RecordId) -> Result<(), ClientError>;
}

/// Reinsurance read endpoints.
#[async_trait(?Send)]
pub trait ReinsuranceApi {
    /// `GET /risk-allocations?policyId={id}`
    async fn risk_allocations(
        &self,
        policy_id: &PolicyId,
    ) -> Result<Vec<RiskAllocationRecord>, ClientError>;
}
