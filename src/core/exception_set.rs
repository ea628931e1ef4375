use crate::core::matcher::matches;
use crate::domain::model::{ExceptionRule, LogRecord};

/// Keep/drop decision for one record. Stops at the first matching rule.
pub fn should_keep(record: &LogRecord, rules: &[ExceptionRule]) -> bool {
    first_match(record, rules).is_none()
}

fn first_match<'a>(record: &LogRecord, rules: &'a [ExceptionRule]) -> Option<&'a ExceptionRule> {
    rules.iter().find(|rule| matches(record, rule))
}

/// Ordered, read-only set of exception rules loaded before filtering starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionSet {
    rules: Vec<ExceptionRule>,
}

impl ExceptionSet {
    pub fn new(rules: Vec<ExceptionRule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[ExceptionRule] {
        &self.rules
    }

    pub fn should_keep(&self, record: &LogRecord) -> bool {
        should_keep(record, &self.rules)
    }

    /// The rule that excepts `record`, if any.
    pub fn first_match(&self, record: &LogRecord) -> Option<&ExceptionRule> {
        first_match(record, &self.rules)
    }
}

impl From<Vec<ExceptionRule>> for ExceptionSet {
    fn from(rules: Vec<ExceptionRule>) -> Self {
        Self::new(rules)
    }
}

/// Whole-input filtering for callers that already hold every record in
/// memory. Uses the same decision as the chunked pipeline.
pub fn filter_records(records: &[LogRecord], exceptions: &ExceptionSet) -> Vec<LogRecord> {
    records
        .iter()
        .filter(|record| exceptions.should_keep(record))
        .cloned()
        .collect()
}
