//! `ConsoleApi` implementation over the admin console's REST endpoints.
use super::util::with_retry;
use crate::core::client::{ConsoleApi, Page, PageMeta, PageParams};
use crate::core::model::{Investment, ParticipationRecord, Referral, TransactionRecord};
use crate::normalize::{self, RawInvestment, RawParticipation, RawTransaction, RawUser};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

/// Paginated list envelope every console endpoint wraps its rows in.
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    result: Vec<T>,
    meta: Option<RawMeta>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    total: Option<u64>,
    total_page: Option<u64>,
}

impl RawMeta {
    fn into_meta(self) -> PageMeta {
        PageMeta {
            total: self.total.unwrap_or(0),
            total_page: self.total_page.unwrap_or(0),
        }
    }
}

pub struct RestConsoleApi {
    base_url: String,
    client: reqwest::Client,
}

impl RestConsoleApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("ilv/1.0")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(RestConsoleApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ListResponse<T>> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("Requesting {url} with query {query:?}");

        let response = with_retry(
            || async { self.client.get(&url).query(query).send().await },
            3,
            500,
        )
        .await
        .with_context(|| format!("Console request failed: {path}"))?;

        let response = response
            .error_for_status()
            .with_context(|| format!("Console returned an error status for {path}"))?;

        let response_text = response
            .text()
            .await
            .context("Failed to get response text")?;

        match serde_json::from_str(&response_text) {
            Ok(data) => Ok(data),
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse console response for {path}"
                );
                Err(e).with_context(|| format!("Failed to parse console response for {path}"))
            }
        }
    }

    fn page_query(params: &PageParams) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", params.page.to_string()),
            ("limit", params.limit.to_string()),
        ];
        if let Some(term) = &params.search_term {
            query.push(("searchTerm", term.clone()));
        }
        query
    }
}

#[async_trait::async_trait]
impl ConsoleApi for RestConsoleApi {
    #[instrument(name = "FetchInvestments", skip(self))]
    async fn fetch_investments(&self) -> Result<Vec<Investment>> {
        let response: ListResponse<RawInvestment> = self.get_list("investments", &[]).await?;
        Ok(normalize::investments(response.result)?)
    }

    #[instrument(name = "FetchParticipations", skip(self, params), fields(investor = %investor_id))]
    async fn fetch_participations(
        &self,
        investor_id: &str,
        params: &PageParams,
    ) -> Result<Page<ParticipationRecord>> {
        let mut query = Self::page_query(params);
        query.push(("investorId", investor_id.to_string()));

        let response: ListResponse<RawParticipation> =
            self.get_list("investment-participants", &query).await?;
        let meta = response.meta.unwrap_or_default().into_meta();
        let items = normalize::participations(response.result)?;
        Ok(Page { items, meta })
    }

    #[instrument(name = "FetchTransactions", skip(self), fields(investor = %investor_id))]
    async fn fetch_transactions(&self, investor_id: &str) -> Result<Vec<TransactionRecord>> {
        let query = [("investorId", investor_id.to_string())];
        let response: ListResponse<RawTransaction> = self.get_list("transactions", &query).await?;
        Ok(normalize::transactions(response.result)?)
    }

    #[instrument(name = "FetchReferrals", skip(self, params), fields(agent = %agent_id))]
    async fn fetch_referrals(&self, agent_id: &str, params: &PageParams) -> Result<Page<Referral>> {
        let mut query = Self::page_query(params);
        query.push(("agent", agent_id.to_string()));

        let response: ListResponse<RawUser> = self.get_list("users", &query).await?;
        let meta = response.meta.unwrap_or_default().into_meta();
        let items = normalize::referrals(response.result)?;
        Ok(Page { items, meta })
    }
}
