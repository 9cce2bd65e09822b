//! Risk allocation records as served by `GET /risk-allocations`.
//!
//! The backend may return a nested reference either populated (an object) or
//! as a bare id string, or omit it. Only a populated reference contributes
//! data: an id-only or absent treaty means "no known limit", an id-only or
//! absent reinsurer means "no known name".

use serde::{Deserialize, Deserializer, Serialize};

/// A nested document reference that may or may not have been populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Populated(T),
    Id(String),
}

impl<T> Reference<T> {
    pub fn populated(&self) -> Option<&T> {
        match self {
            Reference::Populated(value) => Some(value),
            Reference::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reinsurer {
    #[serde(default)]
    pub name: Option<String>,
}

/// A reinsurance contract with a coverage limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treaty {
    #[serde(default)]
    pub treaty_name: Option<String>,
    #[serde(default)]
    pub treaty_limit: Option<f64>,
}

/// Portion of a policy's risk ceded to one reinsurer under one treaty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    #[serde(rename = "reinsurerId", default)]
    pub reinsurer: Option<Reference<Reinsurer>>,
    #[serde(rename = "treatyId", default)]
    pub treaty: Option<Reference<Treaty>>,
    pub allocated_amount: f64,
    pub allocated_percentage: f64,
}

impl Allocation {
    pub fn reinsurer(&self) -> Option<&Reinsurer> {
        self.reinsurer.as_ref().and_then(Reference::populated)
    }

    pub fn treaty(&self) -> Option<&Treaty> {
        self.treaty.as_ref().and_then(Reference::populated)
    }

    pub fn reinsurer_name(&self) -> Option<&str> {
        self.reinsurer()
            .and_then(|r| r.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub fn treaty_name(&self) -> Option<&str> {
        self.treaty()
            .and_then(|t| t.treaty_name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Limit of the referenced treaty; `None` means no limit is known.
    pub fn treaty_limit(&self) -> Option<f64> {
        self.treaty().and_then(|t| t.treaty_limit)
    }

    /// Amount by which this allocation overruns its treaty limit, if it does.
    pub fn excess_over_limit(&self) -> Option<f64> {
        let limit = self.treaty_limit()?;
        (self.allocated_amount > limit).then(|| self.allocated_amount - limit)
    }

    pub fn exceeds_treaty_limit(&self) -> bool {
        self.excess_over_limit().is_some()
    }
}

/// A policy's allocation record: ceded rows plus the unceded residual.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAllocationRecord {
    #[serde(default)]
    pub allocations: Vec<Allocation>,
    /// Absent or `null` reads as nothing retained.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub retained_amount: f64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl RiskAllocationRecord {
    /// Pick the record that speaks for a policy.
    ///
    /// One active record per policy is assumed; the first one returned wins.
    pub fn authoritative(records: Vec<RiskAllocationRecord>) -> Option<RiskAllocationRecord> {
        if records.len() > 1 {
            tracing::warn!(
                count = records.len(),
                "multiple allocation records for policy; using the first"
            );
        }
        records.into_iter().next()
    }

    /// True when any row allocates more than its treaty allows.
    pub fn exceeds_treaty_limits(&self) -> bool {
        self.allocations.iter().any(Allocation::exceeds_treaty_limit)
    }
}
