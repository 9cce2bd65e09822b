//! `riskdesk-reinsurance`: risk allocation records and their checks.
//!
//! Read-only from the console's perspective: nothing here mutates backend
//! state. Overruns of a treaty limit are reported, never rejected.

pub mod allocation;
pub mod display;
pub mod summary;

pub use allocation::{Allocation, Reference, Reinsurer, RiskAllocationRecord, Treaty};
pub use display::{format_amount, AllocationRow, NOT_AVAILABLE};
pub use summary::{AllocationSummary, LimitBreach};
