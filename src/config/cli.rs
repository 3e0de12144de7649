use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "interior-quote")]
#[command(about = "Prices interior design selections and publishes quotations")]
pub struct CliConfig {
    /// Estimator TOML; the built-in catalog is used when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every furniture variant and kitchen tier with its price
    Catalog,

    /// Print the running total for a selections file
    Total {
        #[arg(long)]
        selections: PathBuf,

        /// JSON list of selection changes applied in order, printing the total after each
        #[arg(long)]
        changes: Option<PathBuf>,
    },

    /// Compute the quote and publish the quotation document
    Quote {
        #[arg(long)]
        selections: PathBuf,

        /// Overrides the configured output directory
        #[arg(long)]
        output: Option<String>,

        /// Print the quote summary without writing a document
        #[arg(long)]
        dry_run: bool,

        /// Also write a zip of the quote as JSON, CSV and text
        #[arg(long)]
        bundle: bool,
    },
}
