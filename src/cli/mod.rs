pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pangenome",
    version,
    about = "Ortholog group construction across genomes",
    long_about = "Builds a pangenome of orthologous gene groups from a genome set by running \
                  an all-against-all BLAST search, OrthoMCL pair detection and MCL clustering, \
                  then saves the groups back to the object repository."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a pangenome from a genome set
    Build(commands::build::BuildArgs),

    /// Show or create the configuration file
    Config(commands::config::ConfigArgs),
}
