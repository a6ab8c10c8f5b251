//! # memolookup Report
//!
//! Turns lookup outcomes and fetch errors into operator-facing text or JSON.

pub mod reporter;
pub mod severity;

pub use reporter::{LookupReporter, ReportFormat};
pub use severity::NotFoundSeverity;
