use std::process;

use clap::Parser;
use colored::Colorize;
use knucleotide::{cli::Args, config::Config, run};

fn main() {
    let args = Args::parse();

    #[cfg(feature = "tracing")]
    init_tracing(args.verbose);

    let config = Config::from_args(args).unwrap_or_else(|e| {
        eprintln!(
            "{}\n {}",
            "Problem parsing arguments:".blue().bold(),
            e.to_string().blue()
        );
        process::exit(1);
    });

    if let Err(e) = run::run(&config) {
        eprintln!(
            "{}\n {}",
            "Application error:".blue().bold(),
            e.to_string().blue()
        );
        process::exit(1);
    }
}

/// Logs to stderr; `RUST_LOG` takes precedence over `--verbose`.
#[cfg(feature = "tracing")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
