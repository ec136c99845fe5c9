//! Domain records for the investor ledger, as normalized from the console API.
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::Deserializer;
use std::str::FromStr;

/// Whether a record is currently counted or excluded from investor views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Active,
    Block,
}

impl FromStr for RecordStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(RecordStatus::Active),
            "block" => Ok(RecordStatus::Block),
            _ => Err(()),
        }
    }
}

/// An investment/project as listed by the console.
#[derive(Debug, Clone, PartialEq)]
pub struct Investment {
    pub id: String,
    pub title: String,
    pub details: Option<String>,
    pub status: RecordStatus,
    /// Total capital sought. Absent upstream means share math is not
    /// applicable, never "zero required".
    pub amount_required: Option<Decimal>,
}

/// Denormalized investment reference carried on participation and
/// transaction records.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentRef {
    pub id: String,
    pub title: String,
    pub amount_required: Option<Decimal>,
}

/// One investor's stake in one investment.
///
/// `total_due` and `total_paid` are independent running sums maintained by
/// backend events; they are not required to reconcile with `amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipationRecord {
    pub id: String,
    pub investor_id: String,
    pub investment: InvestmentRef,
    pub amount: Decimal,
    pub total_due: Decimal,
    pub total_paid: Decimal,
    pub status: RecordStatus,
}

/// Event tag on a log entry. `CommissionCalculated` and
/// `CommissionPaymentMade` are administrative and never investor-visible.
/// Unrecognized tags are plain notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    CommissionCalculated,
    CommissionPaymentMade,
    CloseProject,
    ProfitPayment,
    Note,
}

impl LogKind {
    pub fn from_tag(tag: &str) -> LogKind {
        match tag {
            "commissionCalculated" => LogKind::CommissionCalculated,
            "commissionPaymentMade" => LogKind::CommissionPaymentMade,
            "closeProject" => LogKind::CloseProject,
            "profitPayment" => LogKind::ProfitPayment,
            _ => LogKind::Note,
        }
    }

    /// Administrative entries are stripped from investor-facing feeds.
    pub fn is_internal(self) -> bool {
        matches!(
            self,
            LogKind::CommissionCalculated | LogKind::CommissionPaymentMade
        )
    }
}

impl<'de> Deserialize<'de> for LogKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(LogKind::from_tag(&tag))
    }
}

/// Open metadata mapping on a log entry; only the keys the views read are
/// modeled, the rest is ignored at deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogMetadata {
    pub amount: Option<Decimal>,
    pub investor_name: Option<String>,
}

/// A single timestamped event within a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub kind: LogKind,
    /// Secondary classifier used for display wording only.
    pub transaction_kind: Option<LogKind>,
    pub created_at: DateTime<Utc>,
    pub paid_amount: Option<Decimal>,
    pub note: Option<String>,
    pub message: Option<String>,
    pub metadata: LogMetadata,
}

impl LogEntry {
    /// Classifier that drives display wording: `transactionType` when the
    /// backend set one, else the primary tag.
    pub fn display_kind(&self) -> LogKind {
        self.transaction_kind.unwrap_or(self.kind)
    }
}

/// One month's billing cycle for one investment. `logs` and `payment_log`
/// are independent streams over the same transaction; their union ordered by
/// `created_at` descending is the canonical activity feed.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: String,
    pub investment: InvestmentRef,
    /// ISO year-month, e.g. "2024-07".
    pub month: String,
    pub logs: Vec<LogEntry>,
    pub payment_log: Vec<LogEntry>,
}

/// A referred user, as listed by the console for an agent identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Referral {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_kinds() {
        assert!(LogKind::CommissionCalculated.is_internal());
        assert!(LogKind::CommissionPaymentMade.is_internal());
        assert!(!LogKind::CloseProject.is_internal());
        assert!(!LogKind::ProfitPayment.is_internal());
        assert!(!LogKind::Note.is_internal());
    }

    #[test]
    fn test_log_kind_deserialization() {
        let kind: LogKind = serde_json::from_str("\"commissionCalculated\"").unwrap();
        assert_eq!(kind, LogKind::CommissionCalculated);
        let kind: LogKind = serde_json::from_str("\"profitPayment\"").unwrap();
        assert_eq!(kind, LogKind::ProfitPayment);
        // Unknown tags collapse to plain notes
        let kind: LogKind = serde_json::from_str("\"somethingElse\"").unwrap();
        assert_eq!(kind, LogKind::Note);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("active".parse(), Ok(RecordStatus::Active));
        assert_eq!("block".parse(), Ok(RecordStatus::Block));
        assert!("pending".parse::<RecordStatus>().is_err());
    }

    #[test]
    fn test_display_kind_prefers_transaction_kind() {
        let entry = LogEntry {
            kind: LogKind::Note,
            transaction_kind: Some(LogKind::ProfitPayment),
            created_at: Utc::now(),
            paid_amount: None,
            note: None,
            message: None,
            metadata: LogMetadata::default(),
        };
        assert_eq!(entry.display_kind(), LogKind::ProfitPayment);
    }
}
