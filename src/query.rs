//! Single entry point the presentation layer calls.
//!
//! Each method issues the independent fetches it needs (concurrently, they
//! are read-only), runs the pure aggregation over the results, and returns
//! normalized views plus pagination metadata. Working sets are request
//! scoped; nothing is cached between calls. Fetch failures surface as
//! `DataUnavailable` with no partial or stale substitution, and retries
//! belong to the HTTP collaborator, not here.
use crate::core::client::{ConsoleApi, Page, PageMeta, PageParams};
use crate::core::error::LedgerError;
use crate::core::model::{Investment, ParticipationRecord, RecordStatus, Referral};
use crate::feed::{self, FeedEntry};
use crate::ledger::{self, LedgerSummary, Share};
use tracing::debug;

/// One dashboard row: a participation and the ownership share it buys.
#[derive(Debug, Clone)]
pub struct DashboardRow {
    pub participation: ParticipationRecord,
    pub share: Share,
}

/// The investor dashboard view: per-participation rows plus ledger totals.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub rows: Vec<DashboardRow>,
    pub summary: LedgerSummary,
    pub meta: PageMeta,
}

pub struct LedgerQuery<'a> {
    api: &'a dyn ConsoleApi,
}

impl<'a> LedgerQuery<'a> {
    pub fn new(api: &'a dyn ConsoleApi) -> Self {
        LedgerQuery { api }
    }

    /// Ledger dashboard for one investor: summary totals plus per-record
    /// ownership share against the investments lookup table.
    pub async fn dashboard(
        &self,
        investor_id: &str,
        params: &PageParams,
    ) -> Result<Dashboard, LedgerError> {
        let (investments, page) = tokio::try_join!(
            self.api.fetch_investments(),
            self.api.fetch_participations(investor_id, params),
        )
        .map_err(LedgerError::DataUnavailable)?;
        debug!(
            investments = investments.len(),
            participations = page.items.len(),
            "Computing dashboard for {investor_id}"
        );

        let summary = ledger::summarize(&page.items);
        let rows = page
            .items
            .into_iter()
            .map(|participation| {
                let share = ledger::share_of(
                    participation.amount,
                    &participation.investment.id,
                    &investments,
                );
                DashboardRow {
                    participation,
                    share,
                }
            })
            .collect();

        Ok(Dashboard {
            rows,
            summary,
            meta: page.meta,
        })
    }

    /// Merged, year-filtered activity feed for one investor, newest first.
    /// Zero transactions is a valid state and yields an empty feed.
    pub async fn activity(
        &self,
        investor_id: &str,
        year: &str,
    ) -> Result<Vec<FeedEntry>, LedgerError> {
        let transactions = self
            .api
            .fetch_transactions(investor_id)
            .await
            .map_err(LedgerError::DataUnavailable)?;
        debug!(
            transactions = transactions.len(),
            "Building {year} activity feed for {investor_id}"
        );

        Ok(feed::build_feed(&transactions, year))
    }

    /// Investments with the desired status that the investor does not
    /// already hold.
    pub async fn open_offers(
        &self,
        investor_id: &str,
        desired_status: RecordStatus,
        params: &PageParams,
    ) -> Result<Vec<Investment>, LedgerError> {
        let (investments, page) = tokio::try_join!(
            self.api.fetch_investments(),
            self.api.fetch_participations(investor_id, params),
        )
        .map_err(LedgerError::DataUnavailable)?;

        Ok(ledger::filter_open_offers(
            &investments,
            &page.items,
            investor_id,
            desired_status,
        ))
    }

    /// Referral listing for one agent; the count lives in the page meta.
    pub async fn referrals(
        &self,
        agent_id: &str,
        params: &PageParams,
    ) -> Result<Page<Referral>, LedgerError> {
        self.api
            .fetch_referrals(agent_id, params)
            .await
            .map_err(LedgerError::DataUnavailable)
    }
}
