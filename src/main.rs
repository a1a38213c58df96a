//! Internal Tx Trace CLI
//!
//! Rebuilds internal call trees from a transaction store and prints or
//! exports them as nested call stacks and receipt records.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use internal_tx_trace::commands::{
    display_schema, display_version, execute_export, print_block_receipts, print_call_stack,
    print_receipt, validate_args, validate_report_file, ExportArgs, LookupArgs,
};
use internal_tx_trace::utils::config::{DEFAULT_MAX_CALLS, DEFAULT_MAX_DEPTH};
use std::path::PathBuf;

/// Internal Tx Trace - internal call trees for EVM transactions
#[derive(Parser, Debug)]
#[command(name = "internal-tx-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the nested call stack of a transaction
    Tree {
        /// Transaction store JSON file
        #[arg(short, long, env = "INTERNAL_TX_STORE")]
        store: PathBuf,

        /// Transaction hash
        #[arg(short, long)]
        tx: String,

        /// Reject traces with more internal calls than this
        #[arg(long, default_value_t = DEFAULT_MAX_CALLS)]
        max_calls: usize,

        /// Reject traces nested deeper than this
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: u32,
    },

    /// Print the receipt of a transaction, internal transactions included
    Receipt {
        /// Transaction store JSON file
        #[arg(short, long, env = "INTERNAL_TX_STORE")]
        store: PathBuf,

        /// Transaction hash
        #[arg(short, long)]
        tx: String,

        /// Return an empty internal transaction list instead of failing on malformed traces
        #[arg(long)]
        degrade: bool,

        /// Reject traces with more internal calls than this
        #[arg(long, default_value_t = DEFAULT_MAX_CALLS)]
        max_calls: usize,

        /// Reject traces nested deeper than this
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: u32,
    },

    /// Print the receipts of every transaction at a block height
    Block {
        /// Transaction store JSON file
        #[arg(short, long, env = "INTERNAL_TX_STORE")]
        store: PathBuf,

        /// Block height
        #[arg(long)]
        height: u64,

        /// Return an empty internal transaction list instead of failing on malformed traces
        #[arg(long)]
        degrade: bool,

        /// Reject traces with more internal calls than this
        #[arg(long, default_value_t = DEFAULT_MAX_CALLS)]
        max_calls: usize,

        /// Reject traces nested deeper than this
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: u32,
    },

    /// Export a transaction's call tree and receipt records to a report file
    Export {
        /// Transaction store JSON file
        #[arg(short, long, env = "INTERNAL_TX_STORE")]
        store: PathBuf,

        /// Transaction hash
        #[arg(short, long)]
        tx: String,

        /// Output path for JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Reject traces with more internal calls than this
        #[arg(long, default_value_t = DEFAULT_MAX_CALLS)]
        max_calls: usize,

        /// Reject traces nested deeper than this
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: u32,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Tree {
            store,
            tx,
            max_calls,
            max_depth,
        } => {
            let args = LookupArgs {
                store_path: store,
                degrade: false,
                max_calls,
                max_depth,
            };
            print_call_stack(&args, &tx)?;
        }

        Commands::Receipt {
            store,
            tx,
            degrade,
            max_calls,
            max_depth,
        } => {
            let args = LookupArgs {
                store_path: store,
                degrade,
                max_calls,
                max_depth,
            };
            print_receipt(&args, &tx)?;
        }

        Commands::Block {
            store,
            height,
            degrade,
            max_calls,
            max_depth,
        } => {
            let args = LookupArgs {
                store_path: store,
                degrade,
                max_calls,
                max_depth,
            };
            print_block_receipts(&args, height)?;
        }

        Commands::Export {
            store,
            tx,
            output,
            summary,
            max_calls,
            max_depth,
        } => {
            let args = ExportArgs {
                store_path: store,
                transaction_hash: tx,
                output_json: output,
                print_summary: summary,
                max_calls,
                max_depth,
            };

            validate_args(&args)?;
            execute_export(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
