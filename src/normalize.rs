//! Converts raw console API records into the strict domain shapes.
//!
//! Raw shapes are permissive (every field optional) so a partially filled
//! backend payload still deserializes; the conversion here is where missing
//! identity or amount fields become `MalformedRecord` errors. A record that
//! fails rejects its whole batch rather than being skipped, so aggregated
//! totals never undercount.
use crate::core::error::LedgerError;
use crate::core::model::{
    Investment, InvestmentRef, LogEntry, LogKind, LogMetadata, ParticipationRecord, RecordStatus,
    Referral, TransactionRecord,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInvestment {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub details: Option<String>,
    pub status: Option<String>,
    pub amount_required: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInvestmentRef {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub amount_required: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParticipation {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub investor_id: Option<String>,
    pub investment_id: Option<RawInvestmentRef>,
    pub amount: Option<Decimal>,
    pub total_due: Option<Decimal>,
    pub total_paid: Option<Decimal>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawLogMetadata {
    pub amount: Option<Decimal>,
    pub investor_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLogEntry {
    #[serde(rename = "type")]
    pub kind: Option<LogKind>,
    pub transaction_type: Option<LogKind>,
    pub created_at: Option<DateTime<Utc>>,
    pub paid_amount: Option<Decimal>,
    pub note: Option<String>,
    pub message: Option<String>,
    pub metadata: Option<RawLogMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub investment_id: Option<RawInvestmentRef>,
    pub month: Option<String>,
    #[serde(default)]
    pub logs: Vec<RawLogEntry>,
    #[serde(default)]
    pub payment_log: Vec<RawLogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

fn parse_status(raw: Option<String>, record: &'static str) -> Result<RecordStatus, LedgerError> {
    raw.as_deref()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| LedgerError::malformed(record, "status"))
}

fn investment_ref(
    raw: Option<RawInvestmentRef>,
    record: &'static str,
) -> Result<InvestmentRef, LedgerError> {
    let raw = raw.ok_or_else(|| LedgerError::malformed(record, "investmentId"))?;
    Ok(InvestmentRef {
        id: raw
            .id
            .ok_or_else(|| LedgerError::malformed(record, "investmentId._id"))?,
        title: raw.title.unwrap_or_default(),
        amount_required: raw.amount_required,
    })
}

pub fn investment(raw: RawInvestment) -> Result<Investment, LedgerError> {
    Ok(Investment {
        id: raw
            .id
            .ok_or_else(|| LedgerError::malformed("investment", "_id"))?,
        title: raw.title.unwrap_or_default(),
        details: raw.details,
        status: parse_status(raw.status, "investment")?,
        amount_required: raw.amount_required,
    })
}

pub fn investments(raws: Vec<RawInvestment>) -> Result<Vec<Investment>, LedgerError> {
    raws.into_iter().map(investment).collect()
}

pub fn participation(raw: RawParticipation) -> Result<ParticipationRecord, LedgerError> {
    Ok(ParticipationRecord {
        id: raw
            .id
            .ok_or_else(|| LedgerError::malformed("participation", "_id"))?,
        investor_id: raw
            .investor_id
            .ok_or_else(|| LedgerError::malformed("participation", "investorId"))?,
        investment: investment_ref(raw.investment_id, "participation")?,
        // A missing committed amount cannot default to zero without
        // undercounting the ledger.
        amount: raw
            .amount
            .ok_or_else(|| LedgerError::malformed("participation", "amount"))?,
        // Running sums with no terms yet are genuinely zero.
        total_due: raw.total_due.unwrap_or(Decimal::ZERO),
        total_paid: raw.total_paid.unwrap_or(Decimal::ZERO),
        status: parse_status(raw.status, "participation")?,
    })
}

pub fn participations(raws: Vec<RawParticipation>) -> Result<Vec<ParticipationRecord>, LedgerError> {
    raws.into_iter().map(participation).collect()
}

fn log_entry(raw: RawLogEntry) -> Result<LogEntry, LedgerError> {
    let metadata = raw.metadata.unwrap_or_default();
    Ok(LogEntry {
        kind: raw.kind.unwrap_or(LogKind::Note),
        transaction_kind: raw.transaction_type,
        // createdAt is the authoritative ordering key; an entry without one
        // cannot be placed in the feed.
        created_at: raw
            .created_at
            .ok_or_else(|| LedgerError::malformed("log entry", "createdAt"))?,
        paid_amount: raw.paid_amount,
        note: raw.note,
        message: raw.message,
        metadata: LogMetadata {
            amount: metadata.amount,
            investor_name: metadata.investor_name,
        },
    })
}

pub fn transaction(raw: RawTransaction) -> Result<TransactionRecord, LedgerError> {
    Ok(TransactionRecord {
        id: raw
            .id
            .ok_or_else(|| LedgerError::malformed("transaction", "_id"))?,
        investment: investment_ref(raw.investment_id, "transaction")?,
        // A missing month is kept (empty) and excluded later by the feed's
        // year filter, not rejected here.
        month: raw.month.unwrap_or_default(),
        logs: raw.logs.into_iter().map(log_entry).collect::<Result<_, _>>()?,
        payment_log: raw
            .payment_log
            .into_iter()
            .map(log_entry)
            .collect::<Result<_, _>>()?,
    })
}

pub fn transactions(raws: Vec<RawTransaction>) -> Result<Vec<TransactionRecord>, LedgerError> {
    raws.into_iter().map(transaction).collect()
}

pub fn referral(raw: RawUser) -> Result<Referral, LedgerError> {
    Ok(Referral {
        id: raw.id.ok_or_else(|| LedgerError::malformed("user", "_id"))?,
        name: raw.name,
        email: raw.email,
    })
}

pub fn referrals(raws: Vec<RawUser>) -> Result<Vec<Referral>, LedgerError> {
    raws.into_iter().map(referral).collect()
}
