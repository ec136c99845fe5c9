//! Merges transaction log streams into one investor-visible activity feed.
//!
//! Each transaction carries two independent event streams over the same
//! billing cycle (`logs` and `payment_log`); the feed is their union, tagged
//! with the transaction's investment title and month, stripped of
//! administrative entries, and stable-sorted on `created_at` descending.
use crate::core::model::{LogEntry, LogKind, TransactionRecord};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// One investor-visible event in the merged feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub investment_title: String,
    pub month: String,
    pub created_at: DateTime<Utc>,
    pub text: Option<String>,
    pub amount: Option<Decimal>,
}

/// A month passes the filter when it is `YYYY-MM` shaped and starts with
/// the 4-digit year. Absent or malformed months exclude their entries
/// rather than letting them through.
fn month_matches_year(month: &str, year: &str) -> bool {
    let bytes = month.as_bytes();
    bytes.len() >= 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && month.starts_with(year)
}

/// Wording precedence for an entry: fixed messages for closures and profit
/// payments, then `note`, then `message`, else nothing.
fn display_text(entry: &LogEntry) -> Option<String> {
    match entry.display_kind() {
        LogKind::CloseProject => {
            let mut text = "Project closed".to_string();
            if let Some(name) = &entry.metadata.investor_name {
                text.push_str(&format!(" by {name}"));
            }
            Some(text)
        }
        LogKind::ProfitPayment => {
            let mut text = "Payment Initiated".to_string();
            if let Some(note) = &entry.note {
                text.push_str(&format!(" {note}"));
            }
            Some(text)
        }
        _ => entry
            .note
            .clone()
            .or_else(|| entry.message.clone()),
    }
}

/// Amount precedence: `paid_amount`, else `metadata.amount`, else none.
fn display_amount(entry: &LogEntry) -> Option<Decimal> {
    entry.paid_amount.or(entry.metadata.amount)
}

/// Builds the merged, year-filtered activity feed, most recent first.
///
/// Entries with an administrative kind never appear. Ties on `created_at`
/// keep input order: a transaction's `logs` before its `payment_log`,
/// transactions in fetch order. The operation is pure and idempotent.
pub fn build_feed(transactions: &[TransactionRecord], year: &str) -> Vec<FeedEntry> {
    let mut feed: Vec<FeedEntry> = transactions
        .iter()
        .filter(|txn| month_matches_year(&txn.month, year))
        .flat_map(|txn| {
            txn.logs
                .iter()
                .chain(txn.payment_log.iter())
                .filter(|entry| !entry.kind.is_internal())
                .map(|entry| FeedEntry {
                    investment_title: txn.investment.title.clone(),
                    month: txn.month.clone(),
                    created_at: entry.created_at,
                    text: display_text(entry),
                    amount: display_amount(entry),
                })
        })
        .collect();

    // sort_by is stable, so equal timestamps keep input order
    feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{InvestmentRef, LogMetadata};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn entry(kind: LogKind, created_at: &str) -> LogEntry {
        LogEntry {
            kind,
            transaction_kind: None,
            created_at: created_at.parse().unwrap(),
            paid_amount: None,
            note: None,
            message: None,
            metadata: LogMetadata::default(),
        }
    }

    fn transaction(
        title: &str,
        month: &str,
        logs: Vec<LogEntry>,
        payment_log: Vec<LogEntry>,
    ) -> TransactionRecord {
        TransactionRecord {
            id: format!("t-{title}-{month}"),
            investment: InvestmentRef {
                id: "i1".to_string(),
                title: title.to_string(),
                amount_required: None,
            },
            month: month.to_string(),
            logs,
            payment_log,
        }
    }

    #[test]
    fn test_internal_entries_are_excluded() {
        let mut payment = entry(LogKind::ProfitPayment, "2024-06-01T10:00:00Z");
        payment.note = Some("May payout".to_string());
        let txns = vec![
            transaction(
                "Solar Farm",
                "2024-05",
                vec![entry(LogKind::CommissionCalculated, "2024-05-01T10:00:00Z")],
                vec![],
            ),
            transaction("Solar Farm", "2024-06", vec![], vec![payment]),
        ];

        let feed = build_feed(&txns, "2024");
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].text.as_deref(), Some("Payment Initiated May payout"));
    }

    #[test]
    fn test_year_filter() {
        let txns = vec![
            transaction(
                "Solar Farm",
                "2024-03",
                vec![entry(LogKind::Note, "2024-03-10T08:00:00Z")],
                vec![],
            ),
            transaction(
                "Solar Farm",
                "2023-11",
                vec![entry(LogKind::Note, "2023-11-10T08:00:00Z")],
                vec![],
            ),
        ];

        let feed = build_feed(&txns, "2024");
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].month, "2024-03");

        let feed = build_feed(&txns, "2023");
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].month, "2023-11");
    }

    #[test]
    fn test_malformed_month_is_excluded() {
        let txns = vec![
            transaction(
                "Solar Farm",
                "",
                vec![entry(LogKind::Note, "2024-03-10T08:00:00Z")],
                vec![],
            ),
            transaction(
                "Solar Farm",
                "2024",
                vec![entry(LogKind::Note, "2024-03-11T08:00:00Z")],
                vec![],
            ),
            transaction(
                "Solar Farm",
                "garbage",
                vec![entry(LogKind::Note, "2024-03-12T08:00:00Z")],
                vec![],
            ),
        ];

        assert!(build_feed(&txns, "2024").is_empty());
    }

    #[test]
    fn test_streams_merge_sorted_descending() {
        let txns = vec![transaction(
            "Solar Farm",
            "2024-07",
            vec![
                entry(LogKind::Note, "2024-07-01T10:00:00Z"),
                entry(LogKind::Note, "2024-07-20T10:00:00Z"),
            ],
            vec![entry(LogKind::ProfitPayment, "2024-07-10T10:00:00Z")],
        )];

        let feed = build_feed(&txns, "2024");
        let stamps: Vec<_> = feed.iter().map(|e| e.created_at).collect();
        let mut sorted = stamps.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(stamps, sorted);
        assert_eq!(feed.len(), 3);
        assert_eq!(
            feed[0].created_at,
            Utc.with_ymd_and_hms(2024, 7, 20, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut first = entry(LogKind::Note, "2024-07-10T10:00:00Z");
        first.message = Some("from logs".to_string());
        let mut second = entry(LogKind::Note, "2024-07-10T10:00:00Z");
        second.message = Some("from payment log".to_string());

        let txns = vec![transaction("Solar Farm", "2024-07", vec![first], vec![second])];

        let feed = build_feed(&txns, "2024");
        assert_eq!(feed[0].text.as_deref(), Some("from logs"));
        assert_eq!(feed[1].text.as_deref(), Some("from payment log"));
    }

    #[test]
    fn test_build_feed_is_idempotent() {
        let txns = vec![transaction(
            "Solar Farm",
            "2024-07",
            vec![
                entry(LogKind::Note, "2024-07-01T10:00:00Z"),
                entry(LogKind::CloseProject, "2024-07-01T10:00:00Z"),
            ],
            vec![entry(LogKind::ProfitPayment, "2024-07-02T10:00:00Z")],
        )];

        assert_eq!(build_feed(&txns, "2024"), build_feed(&txns, "2024"));
    }

    #[test]
    fn test_close_project_wording() {
        let mut close = entry(LogKind::CloseProject, "2024-07-01T10:00:00Z");
        close.metadata.investor_name = Some("Ada Lovelace".to_string());
        let txns = vec![transaction("Solar Farm", "2024-07", vec![close], vec![])];

        let feed = build_feed(&txns, "2024");
        assert_eq!(feed[0].text.as_deref(), Some("Project closed by Ada Lovelace"));

        let plain = entry(LogKind::CloseProject, "2024-07-01T10:00:00Z");
        let txns = vec![transaction("Solar Farm", "2024-07", vec![plain], vec![])];
        let feed = build_feed(&txns, "2024");
        assert_eq!(feed[0].text.as_deref(), Some("Project closed"));
    }

    #[test]
    fn test_note_message_precedence() {
        let mut both = entry(LogKind::Note, "2024-07-01T10:00:00Z");
        both.note = Some("the note".to_string());
        both.message = Some("the message".to_string());
        let mut message_only = entry(LogKind::Note, "2024-07-01T09:00:00Z");
        message_only.message = Some("the message".to_string());
        let neither = entry(LogKind::Note, "2024-07-01T08:00:00Z");

        let txns = vec![transaction(
            "Solar Farm",
            "2024-07",
            vec![both, message_only, neither],
            vec![],
        )];

        let feed = build_feed(&txns, "2024");
        assert_eq!(feed[0].text.as_deref(), Some("the note"));
        assert_eq!(feed[1].text.as_deref(), Some("the message"));
        assert_eq!(feed[2].text, None);
    }

    #[test]
    fn test_amount_precedence() {
        let mut paid = entry(LogKind::ProfitPayment, "2024-07-03T10:00:00Z");
        paid.paid_amount = Some(dec!(75));
        paid.metadata.amount = Some(dec!(999));
        let mut meta_only = entry(LogKind::Note, "2024-07-02T10:00:00Z");
        meta_only.metadata.amount = Some(dec!(120));
        let informational = entry(LogKind::Note, "2024-07-01T10:00:00Z");

        let txns = vec![transaction(
            "Solar Farm",
            "2024-07",
            vec![paid, meta_only, informational],
            vec![],
        )];

        let feed = build_feed(&txns, "2024");
        assert_eq!(feed[0].amount, Some(dec!(75)));
        assert_eq!(feed[1].amount, Some(dec!(120)));
        assert_eq!(feed[2].amount, None);
    }

    #[test]
    fn test_feed_tags_parent_transaction() {
        let txns = vec![
            transaction(
                "Solar Farm",
                "2024-07",
                vec![entry(LogKind::Note, "2024-07-01T10:00:00Z")],
                vec![],
            ),
            transaction(
                "Wind Park",
                "2024-06",
                vec![entry(LogKind::Note, "2024-06-01T10:00:00Z")],
                vec![],
            ),
        ];

        let feed = build_feed(&txns, "2024");
        assert_eq!(feed[0].investment_title, "Solar Farm");
        assert_eq!(feed[0].month, "2024-07");
        assert_eq!(feed[1].investment_title, "Wind Park");
        assert_eq!(feed[1].month, "2024-06");
    }
}
