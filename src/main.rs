use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use depsim::{Config, Pipeline};

/// Finds distributionally similar words from dependency relations.
#[derive(Parser, Debug)]
#[command(name = "depsim", version, about)]
struct Cli {
    /// Path to the json file with the run parameters.
    config: PathBuf,

    /// Log intermediate tables; overrides the json `debug` value.
    #[arg(long)]
    debug: bool,

    /// Worker threads; overrides the json `num_threads` value.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> ExitCode {

    let cli = Cli::parse();

    let mut params = match Config::new(&cli.config) {
        Ok(config) => config.get_params(),
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    params.debug |= cli.debug;
    if let Some(threads) = cli.threads {
        params.num_threads = threads;
    }

    let default_filter = if params.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match Pipeline::run(&params) {
        Ok(reports) => {
            for report in reports {
                println!("{}\n", report);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}
