//! livebench CLI — browse and filter the LLM benchmark leaderboard.

use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

use commands::SourceArgs;

#[derive(Parser)]
#[command(
    name = "livebench",
    version,
    about = "Filterable LLM benchmark leaderboard"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the leaderboard once and print the rows matching the filters
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Case-insensitive substring of the model or organization name
        #[arg(long, default_value = "")]
        search: String,

        /// Exact organization name, or "all"
        #[arg(long, default_value = "all")]
        org: String,

        /// Minimum global average
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        min_global: f64,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List the organizations and the global average ceiling
    Orgs {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Filter the leaderboard interactively from stdin
    Interactive {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "livebench=info,livebench_core=warn,livebench_source=warn",
                )
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show {
            source,
            search,
            org,
            min_global,
            format,
        } => commands::show::execute(source, search, org, min_global, format).await,
        Commands::Orgs { source } => commands::orgs::execute(source).await,
        Commands::Interactive { source } => commands::interactive::execute(source).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
