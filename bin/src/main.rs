//! tickroll CLI - Simulated price ticks with minute/hour/day rollups.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod display;

use commands::run::RunArgs;

#[derive(Parser)]
#[command(name = "tickroll")]
#[command(about = "Simulated price ticks with minute/hour/day rollups", long_about = None)]
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
}

#[derive(Subcommand)]
enum Commands {
    /// Generate ticks and write rollups until Ctrl-C or the tick limit
    Run {
        /// Directory holding one sample log per instrument
        #[arg(long, env = "TICKROLL_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// JSON engine config; flags below override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Tick period in milliseconds
        #[arg(long)]
        period_ms: Option<u64>,

        /// Half-width of the per-tick price delta
        #[arg(long)]
        max_delta: Option<f64>,

        /// Entries kept per granularity at each day boundary
        #[arg(long)]
        retention_cap: Option<usize>,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many ticks
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Start each price from the last average in its log
        #[arg(long)]
        resume: bool,
    },

    /// List instruments
    List {
        /// Only show members of this group (C25, S&P500, WORLD)
        #[arg(short, long)]
        group: Option<String>,

        /// Case-insensitive ticker substring
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show instrument details and stored sample counts
    Info {
        /// Ticker (e.g., NOVO, AAPL)
        ticker: String,

        /// Directory holding one sample log per instrument
        #[arg(long, env = "TICKROLL_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },

    /// Print the most recent samples of one granularity
    History {
        /// Ticker (e.g., NOVO, AAPL)
        ticker: String,

        /// Granularity (m1, m15, h1, d1)
        #[arg(short, long, default_value = "m1")]
        granularity: String,

        /// Number of samples to show
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Directory holding one sample log per instrument
        #[arg(long, env = "TICKROLL_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },

    /// Bound every log to its newest entries per granularity
    Trim {
        /// Entries kept per granularity
        #[arg(long, default_value = "300")]
        cap: usize,

        /// Directory holding one sample log per instrument
        #[arg(long, env = "TICKROLL_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Installs the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the level derived from the flags.
fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Run {
            data_dir,
            config,
            period_ms,
            max_delta,
            retention_cap,
            seed,
            ticks,
            resume,
        } => {
            let args = RunArgs {
                data_dir,
                config,
                period_ms,
                max_delta,
                retention_cap,
                seed,
                ticks,
                resume,
            };
            commands::run::run(args, cli.quiet).await
        }
        Commands::List { group, search } => {
            commands::list::list_instruments(group.as_deref(), search.as_deref())
        }
        Commands::Info { ticker, data_dir } => commands::info::show_info(&ticker, data_dir),
        Commands::History {
            ticker,
            granularity,
            count,
            data_dir,
        } => commands::history::show_history(&ticker, &granularity, count, data_dir),
        Commands::Trim { cap, data_dir, yes } => commands::trim::trim(cap, data_dir, yes, cli.quiet),
    }
}
