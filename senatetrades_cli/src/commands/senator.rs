//! The `senator` subcommand: one senator's analytics row.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use senatetrades_lib::Db;

use crate::output::{print_senator_analytics, OutputFormat};

#[derive(Args)]
pub struct SenatorArgs {
    /// SQLite database path (required)
    #[arg(long)]
    pub db: PathBuf,

    /// Senator id to look up
    #[arg(long)]
    pub id: i64,
}

pub fn run(args: &SenatorArgs, format: &OutputFormat) -> Result<()> {
    let db = Db::open(&args.db)?;
    match db.senator_analytics(args.id)? {
        Some(row) => {
            let name = db
                .senators()?
                .into_iter()
                .find(|s| s.senator_id == args.id)
                .map(|s| s.name)
                .unwrap_or_else(|| format!("Senator {}", args.id));
            print_senator_analytics(&name, &row, format)
        }
        None => {
            println!("No analytics found for senator {}. Run `senatetrades run` first.", args.id);
            Ok(())
        }
    }
}
