//! Read-side seam to the admin console REST API.
use crate::core::model::{Investment, ParticipationRecord, Referral, TransactionRecord};
use anyhow::Result;
use async_trait::async_trait;

/// Pagination metadata echoed back from the console's list envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageMeta {
    pub total: u64,
    pub total_page: u64,
}

/// One page of normalized records plus its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Raw pagination parameters as the presentation layer supplies them.
#[derive(Debug, Clone)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
    pub search_term: Option<String>,
}

impl Default for PageParams {
    fn default() -> Self {
        PageParams {
            page: 1,
            limit: 10,
            search_term: None,
        }
    }
}

/// Fetch operations the ledger views depend on. Implementations own the
/// HTTP concerns (timeouts, retries); callers treat every method as a
/// single read with no cross-call caching.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    async fn fetch_investments(&self) -> Result<Vec<Investment>>;

    async fn fetch_participations(
        &self,
        investor_id: &str,
        params: &PageParams,
    ) -> Result<Page<ParticipationRecord>>;

    async fn fetch_transactions(&self, investor_id: &str) -> Result<Vec<TransactionRecord>>;

    async fn fetch_referrals(&self, agent_id: &str, params: &PageParams) -> Result<Page<Referral>>;
}
