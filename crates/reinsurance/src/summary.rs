//! Retained-amount reconciliation for one allocation record.

use serde::Serialize;

use crate::allocation::RiskAllocationRecord;
use crate::display::{label_or_na, NOT_AVAILABLE};

/// A row whose allocated amount overruns its treaty limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitBreach {
    /// Position of the row in the record's allocation order.
    pub row: usize,
    pub reinsurer: String,
    pub treaty: String,
    pub allocated_amount: f64,
    pub treaty_limit: f64,
    pub excess: f64,
}

/// Totals that reconcile ceded and retained risk for a policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub ceded_amount: f64,
    pub ceded_percentage: f64,
    pub retained_amount: f64,
    /// Ceded plus retained.
    pub gross_amount: f64,
    pub breaches: Vec<LimitBreach>,
}

impl AllocationSummary {
    pub fn of(record: &RiskAllocationRecord) -> Self {
        let ceded_amount: f64 = record.allocations.iter().map(|a| a.allocated_amount).sum();
        let ceded_percentage: f64 = record
            .allocations
            .iter()
            .map(|a| a.allocated_percentage)
            .sum();

        let breaches = record
            .allocations
            .iter()
            .enumerate()
            .filter_map(|(row, allocation)| {
                let excess = allocation.excess_over_limit()?;
                Some(LimitBreach {
                    row,
                    reinsurer: label_or_na(allocation.reinsurer_name()),
                    treaty: label_or_na(allocation.treaty_name()),
                    allocated_amount: allocation.allocated_amount,
                    treaty_limit: allocation.treaty_limit().unwrap_or_default(),
                    excess,
                })
            })
            .collect();

        Self {
            ceded_amount,
            ceded_percentage,
            retained_amount: record.retained_amount,
            gross_amount: ceded_amount + record.retained_amount,
            breaches,
        }
    }

    pub fn exceeds_treaty_limits(&self) -> bool {
        !self.breaches.is_empty()
    }

    /// Share of the gross amount kept by the cedant, in percent.
    ///
    /// `None` when nothing is on risk.
    pub fn retained_share(&self) -> Option<f64> {
        (self.gross_amount > 0.0).then(|| self.retained_amount / self.gross_amount * 100.0)
    }

    /// Retained share for display, e.g. `"25%"`, or `"N/A"`.
    pub fn retained_share_label(&self) -> String {
        match self.retained_share() {
            Some(share) => format!("{}%", (share * 100.0).round() / 100.0),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}
