//! # memolookup Client
//!
//! Read-only access to a hosted tables API (PostgREST-style
//! `/rest/v1/<collection>` endpoints).
//!
//! - [`ClientConfig`] - Endpoint, access credential and timeout, injected by the caller
//! - [`RemoteRecordClient`] - `fetch_all`, `fetch_one` and `describe`

pub mod config;
pub mod client;

pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use client::RemoteRecordClient;
