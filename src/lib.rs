//! # memolookup
//!
//! Read-only record lookup and verification against a hosted tables API.
//!
//! A lookup is a linear pipeline run once per invocation: the
//! [`RemoteRecordClient`] fetches rows, the [`RecordFinder`] selects the
//! target (or none), and the [`LookupReporter`] prints the outcome.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! export MEMOLOOKUP_ENDPOINT=https://project.example.co
//! export MEMOLOOKUP_ACCESS_KEY=pk_...
//! memolookup find-memorial --name demo --id demo-memorial
//! memolookup find-order --payment-id pi_123
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use memolookup::prelude::*;
//!
//! # async fn lookup() -> Result<()> {
//! let client = RemoteRecordClient::new(ClientConfig::new(
//!     "https://project.example.co",
//!     "pk_publishable_key",
//! ))?;
//!
//! let rows = client.fetch_all("Memorial").await?;
//! let criterion = Criterion::none()
//!     .or_contains("name", "demo")
//!     .or_equals("id", "demo-memorial");
//! let outcome = RecordFinder::new("name").find(&rows, &criterion);
//!
//! LookupReporter::new(ReportFormat::Text, ["id", "name", "access_code"])
//!     .report(&mut std::io::stdout(), &outcome);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - `memolookup-core` - Records, criteria, the finder and the error taxonomy
//! - `memolookup-client` - REST client and its configuration
//! - `memolookup-report` - Text/JSON reporting and not-found severity

// Re-export core types
pub use memolookup_core::{
    Record, RecordSet,
    Criterion, MatchRule, RecordFilter,
    RecordFinder, LookupOutcome,
    Error, Result,
};

// Re-export client
pub use memolookup_client::{ClientConfig, RemoteRecordClient};

// Re-export reporting
pub use memolookup_report::{LookupReporter, NotFoundSeverity, ReportFormat};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Record, RecordSet,
        Criterion, MatchRule, RecordFilter,
        RecordFinder, LookupOutcome,
        Error, Result,
        ClientConfig, RemoteRecordClient,
        LookupReporter, NotFoundSeverity, ReportFormat,
    };
}
