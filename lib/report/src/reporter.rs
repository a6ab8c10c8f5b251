use memolookup_core::{Error, LookupOutcome, Record, MISSING_PLACEHOLDER};
use serde_json::{Map, Value};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{}', expected text or json", other)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Fields of an embedded related record to echo alongside the target.
#[derive(Debug, Clone)]
struct RelatedFields {
    collection: String,
    fields: Vec<String>,
}

/// Renders lookup outcomes for an operator.
///
/// Reporting never fails: absent values print as a placeholder and write
/// errors on the sink are logged and dropped.
#[derive(Debug, Clone)]
pub struct LookupReporter {
    format: ReportFormat,
    fields: Vec<String>,
    related: Option<RelatedFields>,
}

impl LookupReporter {
    pub fn new<I, S>(format: ReportFormat, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            format,
            fields: fields.into_iter().map(Into::into).collect(),
            related: None,
        }
    }

    #[must_use]
    pub fn with_related<I, S>(mut self, collection: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related = Some(RelatedFields {
            collection: collection.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn report<W: Write>(&self, out: &mut W, outcome: &LookupOutcome) {
        let written = match self.format {
            ReportFormat::Text => self.write_text(out, outcome),
            ReportFormat::Json => self.write_json(out, outcome),
        };
        if let Err(e) = written {
            warn!("Failed to write lookup report: {}", e);
        }
    }

    /// Report a fetch failure with the name of the operation that failed.
    pub fn report_error<W: Write>(&self, out: &mut W, operation: &str, error: &Error) {
        let written = match self.format {
            ReportFormat::Text => writeln!(out, "{} failed: {}", operation, error),
            ReportFormat::Json => {
                let body = serde_json::json!({
                    "status": "error",
                    "operation": operation,
                    "error": error.to_string(),
                });
                writeln!(out, "{}", body)
            }
        };
        if let Err(e) = written {
            warn!("Failed to write error report: {}", e);
        }
    }

    /// Plain listing of strings, one per line, e.g. field names from a shape probe.
    pub fn report_list<W: Write>(&self, out: &mut W, title: &str, items: &[String]) {
        let written = match self.format {
            ReportFormat::Text => write_list(out, title, items),
            ReportFormat::Json => {
                let body = serde_json::json!({ "status": "ok", "title": title, "items": items });
                writeln!(out, "{}", body)
            }
        };
        if let Err(e) = written {
            warn!("Failed to write listing: {}", e);
        }
    }

    /// Selected fields of a found record, related fields keyed as `Collection.field`.
    fn selected(&self, record: &Record) -> Vec<(String, Option<Value>)> {
        let mut selected: Vec<(String, Option<Value>)> = self
            .fields
            .iter()
            .map(|f| (f.clone(), record.get(f).cloned()))
            .collect();

        if let Some(related) = &self.related {
            let embedded = record.related(&related.collection);
            for field in &related.fields {
                let value = embedded.as_ref().and_then(|e| e.get(field)).cloned();
                selected.push((format!("{}.{}", related.collection, field), value));
            }
        }
        selected
    }

    fn write_text<W: Write>(&self, out: &mut W, outcome: &LookupOutcome) -> io::Result<()> {
        match outcome {
            LookupOutcome::Found { record } => {
                writeln!(out, "Found record:")?;
                for (field, value) in self.selected(record) {
                    writeln!(out, "  {}: {}", field, display_value(value.as_ref()))?;
                }
                Ok(())
            }
            LookupOutcome::NotFound { considered } => {
                writeln!(out, "No matching record found")?;
                write_list(out, "Records considered", considered)
            }
        }
    }

    fn write_json<W: Write>(&self, out: &mut W, outcome: &LookupOutcome) -> io::Result<()> {
        let body = match outcome {
            LookupOutcome::Found { record } => {
                let fields: Map<String, Value> = self
                    .selected(record)
                    .into_iter()
                    .map(|(field, value)| (field, value.unwrap_or(Value::Null)))
                    .collect();
                serde_json::json!({ "status": "found", "record": fields })
            }
            LookupOutcome::NotFound { .. } => {
                serde_json::to_value(outcome).map_err(io::Error::from)?
            }
        };
        writeln!(out, "{}", body)
    }
}

fn write_list<W: Write>(out: &mut W, title: &str, items: &[String]) -> io::Result<()> {
    writeln!(out, "{} ({}):", title, items.len())?;
    if items.is_empty() {
        return writeln!(out, "  (none)");
    }
    for item in items {
        writeln!(out, "  - {}", item)?;
    }
    Ok(())
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
