pub mod cli;
pub mod core;
pub mod feed;
pub mod ledger;
pub mod normalize;
pub mod providers;
pub mod query;

use crate::core::client::PageParams;
use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Summary,
    Activity { year: String },
    Offers,
    Referrals,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Investor Ledger Viewer starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let api = providers::RestConsoleApi::new(&config.console.base_url)?;
    let params = PageParams {
        page: 1,
        limit: config.page_limit,
        search_term: None,
    };

    match command {
        AppCommand::Summary => cli::summary::run(&api, &config.investor_id, &params).await,
        AppCommand::Activity { year } => cli::activity::run(&api, &config.investor_id, &year).await,
        AppCommand::Offers => cli::offers::run(&api, &config.investor_id, &params).await,
        AppCommand::Referrals => {
            let agent_id = config
                .agent_id
                .as_deref()
                .context("No agent_id configured; the referrals view needs an agent identity")?;
            cli::referrals::run(&api, agent_id, &params).await
        }
    }
}
