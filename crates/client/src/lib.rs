//! `riskdesk-client`: typed REST client for the console backend.
//!
//! Components depend on the [`AdminApi`] and [`ReinsuranceApi`] traits;
//! [`HttpClient`] is the production implementation.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{AdminApi, DataEnvelope, ReinsuranceApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use http::HttpClient;
