use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ilv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for ilv::AppCommand {
    fn from(cmd: Commands) -> ilv::AppCommand {
        match cmd {
            Commands::Summary => ilv::AppCommand::Summary,
            Commands::Activity { year } => ilv::AppCommand::Activity {
                year: year.unwrap_or_else(current_year),
            },
            Commands::Offers => ilv::AppCommand::Offers,
            Commands::Referrals => ilv::AppCommand::Referrals,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the investor ledger summary
    Summary,
    /// Display the merged activity feed for a year
    Activity {
        /// 4-digit year to filter by; defaults to the current year
        #[arg(short, long)]
        year: Option<String>,
    },
    /// Display open investment offers
    Offers,
    /// Display the agent referral listing
    Referrals,
}

fn current_year() -> String {
    chrono::Utc::now().format("%Y").to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => ilv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = ilv::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
investor_id: ""

console:
  base_url: "http://localhost:5000/api/v1"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
