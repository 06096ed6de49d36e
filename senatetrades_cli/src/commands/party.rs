//! The `party` subcommand: one party's rolled-up analytics row.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use senatetrades_lib::Db;

use crate::output::{print_party_analytics, OutputFormat};

#[derive(Args)]
pub struct PartyArgs {
    /// SQLite database path (required)
    #[arg(long)]
    pub db: PathBuf,

    /// Party label as stored on the senators table (e.g. D, R, I)
    #[arg(long)]
    pub name: String,
}

pub fn run(args: &PartyArgs, format: &OutputFormat) -> Result<()> {
    let db = Db::open(&args.db)?;
    match db.party_analytics(&args.name)? {
        Some(row) => print_party_analytics(&row, format),
        None => {
            println!(
                "No analytics found for party '{}'. Run `senatetrades run` first.",
                args.name
            );
            Ok(())
        }
    }
}
