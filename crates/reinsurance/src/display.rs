//! Display rows for the allocation table.

use serde::Serialize;

use crate::allocation::Allocation;

/// Placeholder shown wherever a reference is absent or unpopulated.
pub const NOT_AVAILABLE: &str = "N/A";

pub(crate) fn label_or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

/// Render a number the way the backend sent it: `100`, `12.5`.
pub fn format_amount(value: f64) -> String {
    value.to_string()
}

/// One rendered allocation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationRow {
    pub reinsurer: String,
    pub treaty: String,
    pub amount: String,
    pub percentage: String,
    pub treaty_limit: String,
    pub exceeds_limit: bool,
}

impl From<&Allocation> for AllocationRow {
    fn from(allocation: &Allocation) -> Self {
        Self {
            reinsurer: label_or_na(allocation.reinsurer_name()),
            treaty: label_or_na(allocation.treaty_name()),
            amount: format_amount(allocation.allocated_amount),
            percentage: format!("{}%", format_amount(allocation.allocated_percentage)),
            treaty_limit: allocation
                .treaty_limit()
                .map(format_amount)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            exceeds_limit: allocation.exceeds_treaty_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::{Reference, Reinsurer, Treaty};

    #[test]
    fn populated_row_renders_every_column() {
        let allocation = Allocation {
            reinsurer: Some(Reference::Populated(Reinsurer {
                name: Some("Munich Re".to_string()),
            })),
            treaty: Some(Reference::Populated(Treaty {
                treaty_name: Some("Surplus 2024".to_string()),
                treaty_limit: Some(80.0),
            })),
            allocated_amount: 100.0,
            allocated_percentage: 12.5,
        };

        let row = AllocationRow::from(&allocation);
        assert_eq!(row.reinsurer, "Munich Re");
        assert_eq!(row.treaty, "Surplus 2024");
        assert_eq!(row.amount, "100");
        assert_eq!(row.percentage, "12.5%");
        assert_eq!(row.treaty_limit, "80");
        assert!(row.exceeds_limit);
    }

    #[test]
    fn missing_references_fall_back_to_na() {
        let allocation = Allocation {
            reinsurer: None,
            treaty: Some(Reference::Id("t-77".to_string())),
            allocated_amount: 40.0,
            allocated_percentage: 40.0,
        };

        let row = AllocationRow::from(&allocation);
        assert_eq!(row.reinsurer, NOT_AVAILABLE);
        assert_eq!(row.treaty, NOT_AVAILABLE);
        assert_eq!(row.treaty_limit, NOT_AVAILABLE);
        assert_eq!(row.percentage, "40%");
        assert!(!row.exceeds_limit);
    }
}
