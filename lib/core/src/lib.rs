//! # memolookup Core
//!
//! Core types for looking up a single record among the rows of a remote
//! collection.
//!
//! - [`Record`] - One row, with "field may be absent" accessors
//! - [`Criterion`] - OR-set of [`MatchRule`]s selecting a target record
//! - [`RecordFinder`] - Scans a [`RecordSet`] and yields a [`LookupOutcome`]
//!
//! ## Example
//!
//! ```rust
//! use memolookup_core::{Criterion, LookupOutcome, Record, RecordFinder};
//! use serde_json::json;
//!
//! let rows: Vec<Record> = serde_json::from_value(json!([
//!     {"id": "m1", "name": "Alice"},
//!     {"id": "demo-memorial", "name": "Demo Memorial"},
//! ])).unwrap();
//!
//! let criterion = Criterion::none()
//!     .or_contains("name", "demo")
//!     .or_equals("id", "demo-memorial");
//!
//! let outcome = RecordFinder::new("name").find(&rows, &criterion);
//! assert!(matches!(outcome, LookupOutcome::Found { .. }));
//! ```

pub mod error;
pub mod record;
pub mod criterion;
pub mod finder;

pub use error::{Error, Result};
pub use record::{Record, RecordSet};
pub use criterion::{Criterion, MatchRule, RecordFilter};
pub use finder::{LookupOutcome, RecordFinder, MISSING_PLACEHOLDER};
