mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "senatetrades")]
#[command(about = "Analyze senator financial disclosure trading performance")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analytics pipeline against the database
    Run(commands::run::RunArgs),
    /// Show one senator's analytics row
    Senator(commands::senator::SenatorArgs),
    /// Show one party's rolled-up analytics row
    Party(commands::party::PartyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("senatetrades=info".parse().unwrap())
                .add_directive("senatetrades_lib=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    match &cli.command {
        Commands::Run(args) => commands::run::run(args, &format).await?,
        Commands::Senator(args) => commands::senator::run(args, &format)?,
        Commands::Party(args) => commands::party::run(args, &format)?,
    }

    Ok(())
}
