//! Larch Command-Line Interface
//!
//! The main entry point for the `larch` tool.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use larch_cli::LarchConfig;
use larch_cli::commands::{catalog, lower, version};

/// Larch - match unitaries against a gate catalog and lower them to Sycamore
#[derive(Parser)]
#[command(name = "larch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "LARCH_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower a batch of matrices to Sycamore circuits
    Lower {
        /// Input file (JSON batch of matrices)
        #[arg(short, long)]
        input: String,

        /// Output file for the JSON report (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Grid row the target qubits are placed on
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        row: i32,
    },

    /// Show the gate catalog in matching order
    Catalog,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = LarchConfig::load(cli.config.as_deref())?;

    // -v overrides the configured level
    let filter = match cli.verbose {
        0 => config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lower { input, output, row } => {
            lower::execute(&input, output.as_deref(), row, &config)
        }
        Commands::Catalog => {
            catalog::execute();
            Ok(())
        }
        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}
