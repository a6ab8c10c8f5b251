use memolookup_core::LookupOutcome;
use std::fmt;
use std::str::FromStr;
use tracing::{error, warn};

/// How a `NotFound` lookup outcome affects the run.
///
/// `Warn` reports the absence and still completes successfully; `Error`
/// reports it and marks the run as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotFoundSeverity {
    #[default]
    Warn,
    Error,
}

impl NotFoundSeverity {
    /// Whether this outcome should fail the run. Logs the absence either way.
    pub fn fails(&self, outcome: &LookupOutcome) -> bool {
        match (outcome, self) {
            (LookupOutcome::Found { .. }, _) => false,
            (LookupOutcome::NotFound { considered }, NotFoundSeverity::Warn) => {
                warn!("Target record not found among {} record(s)", considered.len());
                false
            }
            (LookupOutcome::NotFound { considered }, NotFoundSeverity::Error) => {
                error!("Target record not found among {} record(s)", considered.len());
                true
            }
        }
    }
}

impl FromStr for NotFoundSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warn" | "warning" => Ok(NotFoundSeverity::Warn),
            "error" => Ok(NotFoundSeverity::Error),
            other => Err(format!("unknown severity '{}', expected warn or error", other)),
        }
    }
}

impl fmt::Display for NotFoundSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundSeverity::Warn => write!(f, "warn"),
            NotFoundSeverity::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memolookup_core::Record;

    #[test]
    fn test_found_never_fails() {
        let outcome = LookupOutcome::Found { record: Record::default() };
        assert!(!NotFoundSeverity::Warn.fails(&outcome));
        assert!(!NotFoundSeverity::Error.fails(&outcome));
    }

    #[test]
    fn test_not_found_depends_on_severity() {
        let outcome = LookupOutcome::NotFound { considered: vec!["Alice".into()] };
        assert!(!NotFoundSeverity::Warn.fails(&outcome));
        assert!(NotFoundSeverity::Error.fails(&outcome));
    }

    #[test]
    fn test_parse() {
        assert_eq!("warning".parse::<NotFoundSeverity>().unwrap(), NotFoundSeverity::Warn);
        assert_eq!("ERROR".parse::<NotFoundSeverity>().unwrap(), NotFoundSeverity::Error);
        assert!("fatal".parse::<NotFoundSeverity>().is_err());
    }
}
