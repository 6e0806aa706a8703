use clap::Parser;
use colored::*;
use pangenome_orthomcl::cli::{Cli, Commands};
use pangenome_orthomcl::{BuildFailure, PangenomeError};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging with PANGENOME_LOG environment variable support
    let log_level = std::env::var("PANGENOME_LOG").unwrap_or_else(|_| {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
        .to_string()
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let cause = e
            .downcast_ref::<BuildFailure>()
            .map(|failure| &failure.cause)
            .or_else(|| e.downcast_ref::<PangenomeError>());
        let exit_code = match cause {
            Some(PangenomeError::Config(_)) => 2,
            Some(PangenomeError::Io(_)) => 3,
            Some(PangenomeError::Parse(_)) | Some(PangenomeError::UnknownSyntheticId(_)) => 4,
            Some(PangenomeError::Repository(_)) => 5,
            Some(PangenomeError::Stage(_)) => 6,
            Some(PangenomeError::TooManyGenomes { .. }) | Some(PangenomeError::InvalidIndex(_)) => 7,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Build(args) => pangenome_orthomcl::cli::commands::build::run(args),
        Commands::Config(args) => pangenome_orthomcl::cli::commands::config::run(args),
    }
}
