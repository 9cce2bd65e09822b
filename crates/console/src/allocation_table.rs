//! Read-only allocation table for one policy.

use riskdesk_client::{ClientError, ReinsuranceApi};
use riskdesk_core::PolicyId;
use riskdesk_reinsurance::{format_amount, AllocationRow, AllocationSummary, RiskAllocationRecord};

pub const SELECT_PROMPT: &str = "Select a policy to view allocations.";
pub const LOAD_FAILED: &str = "Failed to load allocations";
pub const LIMIT_WARNING: &str = "One or more allocations exceed treaty limits!";

/// Rendered contents of a loaded policy.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationView {
    pub policy_id: PolicyId,
    pub rows: Vec<AllocationRow>,
    pub retained_amount: String,
    pub summary: AllocationSummary,
}

impl AllocationView {
    /// Build from the query result; only the first record counts.
    pub fn from_records(policy_id: PolicyId, records: Vec<RiskAllocationRecord>) -> Self {
        let record = RiskAllocationRecord::authoritative(records).unwrap_or_default();
        Self {
            policy_id,
            rows: record.allocations.iter().map(AllocationRow::from).collect(),
            retained_amount: format_amount(record.retained_amount),
            summary: AllocationSummary::of(&record),
        }
    }

    pub fn exceeds_treaty_limits(&self) -> bool {
        self.summary.exceeds_treaty_limits()
    }

    /// Policy-level warning, if any row overruns its treaty.
    pub fn warning(&self) -> Option<&'static str> {
        self.exceeds_treaty_limits().then_some(LIMIT_WARNING)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AllocationState {
    /// No policy selected.
    Prompt,
    Loading { policy_id: PolicyId },
    Failed { policy_id: PolicyId, message: String },
    Loaded(AllocationView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationTable {
    state: AllocationState,
}

impl Default for AllocationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationTable {
    pub fn new() -> Self {
        Self {
            state: AllocationState::Prompt,
        }
    }

    pub fn state(&self) -> &AllocationState {
        &self.state
    }

    /// Select a policy, discarding whatever was shown before.
    ///
    /// Returns the policy to fetch, or `None` when the selection is blank and
    /// the prompt is shown instead.
    pub fn select_policy(&mut self, raw: Option<&str>) -> Option<PolicyId> {
        match PolicyId::parse_optional(raw) {
            Some(policy_id) => {
                self.state = AllocationState::Loading {
                    policy_id: policy_id.clone(),
                };
                Some(policy_id)
            }
            None => {
                self.state = AllocationState::Prompt;
                None
            }
        }
    }

    /// Apply a fetch result for `policy_id`.
    ///
    /// A result for a policy that is no longer selected is dropped.
    pub fn finish_load(
        &mut self,
        policy_id: PolicyId,
        result: Result<Vec<RiskAllocationRecord>, ClientError>,
    ) {
        let current = match &self.state {
            AllocationState::Loading { policy_id } => policy_id,
            _ => return,
        };
        if current != &policy_id {
            tracing::debug!(%policy_id, "dropping allocations for a deselected policy");
            return;
        }

        self.state = match result {
            Ok(records) => {
                let view = AllocationView::from_records(policy_id, records);
                if view.exceeds_treaty_limits() {
                    tracing::info!(
                        policy_id = %view.policy_id,
                        breaches = view.summary.breaches.len(),
                        "allocations exceed treaty limits"
                    );
                }
                AllocationState::Loaded(view)
            }
            Err(err) => {
                tracing::warn!(%policy_id, error = %err, "loading allocations failed");
                AllocationState::Failed {
                    policy_id,
                    message: LOAD_FAILED.to_string(),
                }
            }
        };
    }

    /// Select a policy and fetch its allocations. Blank selections fetch nothing.
    pub async fn load<R: ReinsuranceApi>(&mut self, api: &R, raw: Option<&str>) {
        let Some(policy_id) = self.select_policy(raw) else {
            return;
        };
        let result = api.risk_allocations(&policy_id).await;
        self.finish_load(policy_id, result);
    }
}
