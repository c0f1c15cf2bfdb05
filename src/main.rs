use backsearch::{Cli, Output};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code for configuration and search errors, distinct from "no match"
const ERROR_EXIT_CODE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let quiet = cli.quiet;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            Output::new(false, quiet).error(&format!("{:#}", e));
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}

fn setup_logging(verbose: bool) {
    // RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("backsearch=debug,warn")
        } else {
            EnvFilter::new("backsearch=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
