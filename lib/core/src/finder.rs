use serde::Serialize;
use crate::criterion::{Criterion, RecordFilter};
use crate::record::{Record, RecordSet};

/// Substituted into summaries for records that lack the display field.
pub const MISSING_PLACEHOLDER: &str = "<missing>";

/// Result of applying a criterion to a record set.
///
/// `NotFound` is an ordinary outcome, not an error: it carries the display
/// field of every record that was considered so an operator can see what the
/// backend did return.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found { record: Record },
    NotFound { considered: Vec<String> },
}

impl LookupOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found { .. })
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            LookupOutcome::Found { record } => Some(record),
            LookupOutcome::NotFound { .. } => None,
        }
    }
}

/// Locates a single record by scanning in source order. Earliest match wins.
#[derive(Debug, Clone)]
pub struct RecordFinder {
    display_field: String,
}

impl RecordFinder {
    pub fn new(display_field: impl Into<String>) -> Self {
        Self {
            display_field: display_field.into(),
        }
    }

    pub fn find(&self, records: &RecordSet, criterion: &Criterion) -> LookupOutcome {
        match records.iter().find(|r| criterion.matches(r)) {
            Some(record) => LookupOutcome::Found {
                record: record.clone(),
            },
            None => LookupOutcome::NotFound {
                considered: self.summarize(records),
            },
        }
    }

    /// Project the display field of every record, keeping source order.
    pub fn summarize(&self, records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| {
                r.get_text(&self.display_field)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|| MISSING_PLACEHOLDER.to_string())
            })
            .collect()
    }
}

impl Default for RecordFinder {
    fn default() -> Self {
        Self::new("name")
    }
}
