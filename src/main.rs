use std::path::PathBuf;

use anvil_examples::commands::{self, Commands};
use anvil_examples::{AnvilClient, ClientConfig};
use clap::Parser;
use env_logger::Env;

#[derive(Parser, Debug)]
#[command(name = "anvil_examples", version)]
#[command(about = "Runnable examples for the Anvil document API", long_about = None)]
struct Cli {
    /// API key from your organization settings
    #[arg(long, env = "ANVIL_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Directory for generated files (defaults to ./output next to src/)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ClientConfig::from_env();
    let cli = Cli::parse();
    log::debug!("{:?}", cli.command);

    let config = match cli.api_key {
        Some(key) => config.with_api_key(Some(key)),
        None => config,
    };
    let client = AnvilClient::new(config)?;

    commands::run(cli.command, &client, cli.output_dir.as_deref()).await
}
