use crate::cli::commands::resolve_config;
use crate::core::config::{default_config, save_config};
use crate::core::paths;
use anyhow::Context;
use clap::{Args, Subcommand};
use colored::*;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show {
        /// Configuration file (defaults to the one in the home directory)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Write a default configuration file
    Init {
        /// Where to write it
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show { config } => {
            let config = resolve_config(config.as_deref())?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { path, force } => {
            let path = path.unwrap_or_else(paths::default_config_path);
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            save_config(&path, &default_config())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Wrote {}", "✓".green().bold(), path.display());
        }
    }
    Ok(())
}
