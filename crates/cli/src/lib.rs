pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rigline_core::config::{AppConfig, LoadOptions, LogFormat, LoggingConfig};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "rigline",
    about = "Rigline quoting CLI",
    long_about = "Resolve operator shorthand against the catalog snapshot and compute quote totals.",
    after_help = "Examples:\n  rigline resolve --input lines.txt\n  rigline totals --quote quote.json --discount 10\n  rigline catalog"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to the rigline config file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Resolve a shorthand block into priced and unknown lines")]
    Resolve {
        #[arg(long, help = "Read the shorthand block from this file instead of stdin")]
        input: Option<PathBuf>,
        #[arg(long, help = "Catalog snapshot file (overrides the configured path)")]
        catalog: Option<PathBuf>,
    },
    #[command(about = "Compute the financial cascade for a stored quote")]
    Totals {
        #[arg(long, help = "Quote file (JSON)")]
        quote: PathBuf,
        #[arg(long, help = "Discount percent applied to the subtotal (0-100)")]
        discount: Option<Decimal>,
        #[arg(long, help = "Secondary discount percent applied after VAT (0-100)")]
        extra_discount: Option<Decimal>,
        #[arg(
            long,
            help = "Treat the quote's lines as legacy flat records and regroup split rows first"
        )]
        regroup_splits: bool,
    },
    #[command(about = "Inspect the catalog snapshot the resolver would use")]
    Catalog {
        #[arg(long, help = "Catalog snapshot file (overrides the configured path)")]
        catalog: Option<PathBuf>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
    }) {
        Ok(config) => config,
        Err(error) => {
            let result = CommandResult::failure("config", "configuration", error.to_string(), 2);
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };

    init_tracing(&config.logging);

    let result = match cli.command {
        Command::Resolve { input, catalog } => {
            commands::resolve::run(&config, input.as_deref(), catalog.as_deref())
        }
        Command::Totals { quote, discount, extra_discount, regroup_splits } => {
            commands::totals::run(&config, &quote, discount, extra_discount, regroup_splits)
        }
        Command::Catalog { catalog } => commands::catalog::run(&config, catalog.as_deref()),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // Command output on stdout stays machine-readable; diagnostics go to
    // stderr in the configured format.
    let _ = match logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
