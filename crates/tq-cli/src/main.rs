//! CLI frontend for Twenty Questions.

mod commands;
mod settings;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use settings::{Overrides, Settings};

#[derive(Parser)]
#[command(
    name = "tq",
    about = "Twenty Questions: find the secret item with yes/no questions",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    oracle: OracleArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OracleArgs {
    /// Oracle endpoint URL
    #[arg(long, global = true, env = "TQ_ENDPOINT")]
    endpoint: Option<String>,

    /// Bearer token sent to the oracle
    #[arg(long, global = true, env = "TQ_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Seconds to wait for each oracle answer (default: 5)
    #[arg(long, global = true)]
    timeout: Option<f64>,

    /// Config file (default: <config dir>/twenty-questions/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play {
        /// Question budget (default: 20)
        #[arg(short = 'n', long)]
        max_questions: Option<u32>,
    },

    /// Ask the oracle for a secret item and print it
    Pick,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TQ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), String> {
    let OracleArgs {
        endpoint,
        token,
        timeout,
        config,
    } = cli.oracle;
    let max_questions = match cli.command {
        Commands::Play { max_questions } => max_questions,
        Commands::Pick => None,
    };

    let settings = Settings::load(config.as_deref())?.with_overrides(Overrides {
        endpoint,
        token,
        timeout_secs: timeout,
        max_questions,
    })?;
    tracing::debug!(
        endpoint = settings.endpoint.as_deref().unwrap_or("<unset>"),
        max_questions = settings.max_questions,
        timeout_ms = settings.timeout.as_millis() as u64,
        "settings resolved"
    );

    match cli.command {
        Commands::Play { .. } => commands::play::run(&settings).await,
        Commands::Pick => commands::pick::run(&settings).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
