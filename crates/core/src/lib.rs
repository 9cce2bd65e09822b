//! `riskdesk-core`: identifiers, errors and entity identity shared by every crate.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{remove_by_id, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{PolicyId, RecordId};
