// Client-side match rules applied to fetched records
use crate::Record;

pub trait RecordFilter {
    fn matches(&self, record: &Record) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    /// Case-insensitive substring test on a text field.
    Contains { field: String, needle: String },
    /// Exact string equality on a field.
    Equals { field: String, value: String },
}

impl MatchRule {
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        MatchRule::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        MatchRule::Equals {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl RecordFilter for MatchRule {
    fn matches(&self, record: &Record) -> bool {
        match self {
            MatchRule::Contains { field, needle } => record
                .get_text(field)
                .map(|v| v.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
            MatchRule::Equals { field, value } => record
                .get_text(field)
                .map(|v| v == value.as_str())
                .unwrap_or(false),
        }
    }
}

/// Alternative rules joined with OR. An empty criterion matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criterion {
    rules: Vec<MatchRule>,
}

impl Criterion {
    pub fn new(rules: Vec<MatchRule>) -> Self {
        Self { rules }
    }

    /// Criterion that rejects every record, used to list what a fetch returned.
    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn or(mut self, rule: MatchRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn or_contains(self, field: impl Into<String>, needle: impl Into<String>) -> Self {
        self.or(MatchRule::contains(field, needle))
    }

    #[must_use]
    pub fn or_equals(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.or(MatchRule::equals(field, value))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RecordFilter for Criterion {
    fn matches(&self, record: &Record) -> bool {
        self.rules.iter().any(|rule| rule.matches(record))
    }
}

impl FromIterator<MatchRule> for Criterion {
    fn from_iter<I: IntoIterator<Item = MatchRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
