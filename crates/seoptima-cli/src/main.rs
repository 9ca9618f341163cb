mod keywords;
mod sites;

use clap::{Parser, Subcommand};
use seoptima_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "seoptima")]
#[command(about = "Search Console property resolution and keyword extraction")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the Search Console properties on the connected account
    Properties,
    /// Show which verified properties a site string resolves to, in query order
    Resolve {
        /// Site as a user would type it, e.g. `example.com` or `https://www.example.com/`
        site: String,

        /// Resolve against these identifiers instead of the account listing
        #[arg(long = "property", value_name = "ID")]
        properties: Vec<String>,
    },
    /// Fetch ranking keywords for a site from Search Console
    Keywords {
        /// Site as a user would type it
        site: String,

        /// Days of data to fetch (defaults to `GSC_LOOKBACK_DAYS`)
        #[arg(long)]
        days: Option<u32>,

        /// Maximum keyword rows to print
        #[arg(long, default_value_t = 25)]
        limit: usize,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = seoptima_core::load_app_config()?;
    init_tracing(&config)?;
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Properties) => sites::run_properties(&config).await,
        Some(Commands::Resolve { site, properties }) => {
            sites::run_resolve(&config, &site, &properties).await
        }
        Some(Commands::Keywords {
            site,
            days,
            limit,
            json,
        }) => keywords::run_keywords(&config, &site, days, limit, json).await,
        None => {
            println!("seoptima: run with --help to list commands");
            Ok(())
        }
    }
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests;
