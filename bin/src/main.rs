//! reclab CLI - Fetch and stream multi-table recommendation datasets.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use reclab_lib::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "reclab")]
#[command(about = "Fetch and stream multi-table recommendation datasets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Cache root directory. Defaults to $RECLAB_HOME or the platform cache directory.
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered datasets
    List,

    /// Show the tables a dataset declares and its cache state
    Tables {
        /// Dataset name (e.g., book, movie, blog_rec)
        dataset: String,
    },

    /// Download, unpack, and validate a dataset
    Fetch {
        /// Dataset name
        dataset: String,
    },

    /// Show row count, column count, and header of a table
    Info {
        /// Dataset name
        dataset: String,

        /// Table file name (e.g., Ratings.csv)
        table: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the header of a table
    Head {
        /// Dataset name
        dataset: String,

        /// Table file name
        table: String,
    },

    /// Stream table rows to stdout
    Rows {
        /// Dataset name
        dataset: String,

        /// Table file name
        table: String,

        /// First data row to print (inclusive, header not counted)
        #[arg(short, long)]
        start: Option<usize>,

        /// Data row to stop before (exclusive)
        #[arg(short, long)]
        end: Option<usize>,

        /// Rows read ahead per refill
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Also print the header line first
        #[arg(long)]
        header: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = match cli.cache_dir {
        Some(dir) => DatasetConfig::default().with_cache_root(dir),
        None => DatasetConfig::default(),
    };

    match command {
        Commands::List => commands::list::list_datasets(),
        Commands::Tables { dataset } => commands::tables::show_tables(&dataset, &config),
        Commands::Fetch { dataset } => commands::fetch::fetch(&dataset, &config, cli.quiet),
        Commands::Info {
            dataset,
            table,
            json,
        } => commands::info::show_info(&dataset, &table, json, &config, cli.quiet),
        Commands::Head { dataset, table } => {
            commands::head::show_header(&dataset, &table, &config, cli.quiet)
        }
        Commands::Rows {
            dataset,
            table,
            start,
            end,
            chunk_size,
            header,
        } => {
            let options = LoaderOptions {
                chunk_size,
                start,
                end,
            };
            commands::rows::stream_rows(&dataset, &table, options, header, &config, cli.quiet)
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
