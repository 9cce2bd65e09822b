//! `riskdesk-console`
//!
//! **Responsibility:** the admin console's screens.
//!
//! This crate provides:
//! - User management (list, create/edit form, confirm-before-delete)
//! - The read-only reinsurance allocation table with treaty-limit warnings
//! - Route resolution for the admin area
//!
//! Components own their state and talk to the backend only through the
//! `riskdesk-client` traits. The Leptos views under `frontend` are built for
//! `wasm32` only.

pub mod allocation_table;
pub mod confirm;
pub mod directory;
pub mod editor;
pub mod routes;
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(test)]
mod fakes;

pub use allocation_table::{AllocationState, AllocationTable, AllocationView};
pub use confirm::Confirm;
pub use directory::{DeleteOutcome, DirectoryView, UserDirectory, UserRow};
pub use editor::{EditorMode, Field, SubmitError, SubmitOutcome, UserEditor};
pub use routes::{AdminRoute, ConsoleRoute};
