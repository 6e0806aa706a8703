use crate::cli::commands::resolve_config;
use crate::pipeline::driver::{BuildOutput, BuildParams, CallContext, PangenomeBuilder};
use crate::repository::LocalRepository;
use clap::Args;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args)]
pub struct BuildArgs {
    /// Reference of the input genome set
    #[arg(short = 'g', long, value_name = "REF")]
    pub genome_set: String,

    /// Name (and id) of the pangenome to save
    #[arg(short = 'o', long, value_name = "NAME")]
    pub output_id: String,

    /// Workspace to save the pangenome into
    #[arg(short = 'w', long, value_name = "WORKSPACE")]
    pub workspace: String,

    /// Use a directory of JSON objects instead of a workspace service
    #[arg(long, value_name = "DIR", conflicts_with = "workspace_url")]
    pub repository_dir: Option<PathBuf>,

    /// Workspace service endpoint
    #[arg(long, env = "PANGENOME_WORKSPACE_URL", value_name = "URL")]
    pub workspace_url: Option<String>,

    /// Authentication token for the workspace service
    #[arg(long, env = "PANGENOME_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root directory for the run workspace
    #[arg(long, value_name = "DIR")]
    pub scratch: Option<PathBuf>,

    /// Keep the run workspace after the build
    #[arg(long)]
    pub keep_workspace: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(scratch) = &args.scratch {
        config.workspace.scratch_root = scratch.clone();
    }
    if args.keep_workspace {
        config.workspace.preserve_always = true;
    }
    if let Some(url) = &args.workspace_url {
        config.repository.workspace_url = Some(url.clone());
    }

    let params = BuildParams {
        input_genomeset_ref: args.genome_set.clone(),
        output_pangenome_id: args.output_id.clone(),
        output_workspace: args.workspace.clone(),
    };
    let builder = PangenomeBuilder::new(config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Building pangenome {}", params.output_pangenome_id));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = match &args.repository_dir {
        Some(dir) => builder.build(&LocalRepository::new(dir), &params),
        None => {
            let context = CallContext {
                token: args.token.clone(),
            };
            builder.build_pangenome_with_orthomcl(&context, &params)
        }
    };
    spinner.finish_and_clear();

    let output = result?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_output(&output);
    }
    Ok(())
}

fn print_output(output: &BuildOutput) {
    print!("{}", output.output_log);
    println!(
        "{} Saved pangenome {}",
        "✓".green().bold(),
        output.pangenome_ref.bold()
    );
}
