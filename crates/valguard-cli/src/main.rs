mod constructor;
mod errors;
mod parser;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for catalog listings and call results
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Print results to standard output (human-readable)
    Stdout,
    /// Output results in JSON format
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "valguard",
    version,
    about = "ValGuard CLI - Evaluate validation functions by name",
    long_about = "ValGuard exposes a catalog of single-value validation functions. Each function \
                  takes one value and returns true, false or unknown. Functions that need \
                  parameters (ranges, patterns, allowed members) are declared in a TOML file.\n\n\
                  Example usage:\n  \
                  valguard call is_cidr 10.0.0.0/24\n  \
                  valguard --config functions.toml list"
)]
pub struct Args {
    /// Path to a TOML file declaring configured functions
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "stdout", global = true)]
    output: OutputFormat,

    /// Enable debug logging and detailed error backtraces
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every registered function
    List {
        /// Show markdown descriptions instead of plain text
        #[arg(long)]
        markdown: bool,
    },
    /// Call one function with one value
    Call {
        /// Registered function name
        function: String,
        /// Input value. Omit together with --null or --unknown
        #[arg(required_unless_present_any = ["null", "unknown"], allow_negative_numbers = true)]
        value: Option<String>,
        /// Pass an explicitly absent value
        #[arg(long, conflicts_with_all = ["value", "unknown"])]
        null: bool,
        /// Pass a value that is not known yet
        #[arg(long, conflicts_with = "value")]
        unknown: bool,
        /// Pass the value as a number instead of a string
        #[arg(long)]
        number: bool,
    },
    /// Call one function for every line of a file
    Check {
        /// Registered function name
        function: String,
        /// File with one value per line. Empty lines are passed as null
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
}

/// Per-diagnostic warnings from the adapter are already printed by the reporter.
fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn,valguard_core::function=error"
    }
}

fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let args = Args::parse();

    init_logging(args.debug);
    let debug = args.debug;

    match runner::run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            if debug {
                eprintln!("Error: {:?}", err);
            } else {
                eprintln!("Error: {:#}", err);
                eprintln!("\nHint: Run with --debug flag for detailed stack traces");
            }
            std::process::exit(1);
        }
    }
}
