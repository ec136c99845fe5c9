use thiserror::Error;

/// Failures surfaced by normalization and the query facade.
///
/// A malformed record aborts its whole batch instead of being skipped, so
/// totals are never silently undercounted. A failed fetch surfaces as
/// `DataUnavailable` with no partial or stale substitution.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("malformed {record} record: missing required field `{field}`")]
    MalformedRecord {
        record: &'static str,
        field: &'static str,
    },

    #[error("data unavailable: {0}")]
    DataUnavailable(anyhow::Error),
}

impl LedgerError {
    pub fn malformed(record: &'static str, field: &'static str) -> Self {
        LedgerError::MalformedRecord { record, field }
    }
}
