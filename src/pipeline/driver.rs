//! Pipeline driver
//!
//! Runs every stage in a fixed order inside one [`RunWorkspace`], threading a
//! single [`RunLog`] through all of them. The first failing stage aborts the
//! run; nothing is saved unless every stage succeeded.

use crate::bio::fasta::parse_fasta;
use crate::core::config::Config;
use crate::pipeline::assembler::{self, METHOD_NAME};
use crate::pipeline::error::{failure_trace, BuildFailure, Stage, StageError};
use crate::pipeline::extractor::{extract_genome, FeatureTable};
use crate::pipeline::log::RunLog;
use crate::pipeline::projector::project_groups_file;
use crate::repository::traits::{fetch_as, ObjectRepository};
use crate::repository::WorkspaceClient;
use crate::tools::orthomcl::{render_config, OrthoMcl};
use crate::tools::traits::{CommandRunner, ToolCommand};
use crate::tools::{blast, mcl, staging, SystemRunner};
use crate::types::genome::{Genome, GenomeSet};
use crate::workspace::RunWorkspace;
use crate::{PangenomeError, Result};
use serde::{Deserialize, Serialize};

/// Largest genome set an all-against-all search is run for
pub const MAX_GENOMES: usize = 10;

/// Caller context of an RPC-style invocation
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildParams {
    pub input_genomeset_ref: String,
    pub output_pangenome_id: String,
    pub output_workspace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildOutput {
    pub output_log: String,
    pub pangenome_ref: String,
}

pub struct PangenomeBuilder {
    config: Config,
    runner: Box<dyn CommandRunner>,
}

impl PangenomeBuilder {
    /// Builder that launches the real toolchain
    pub fn new(config: Config) -> Self {
        Self::with_runner(config, Box::new(SystemRunner::new()))
    }

    pub fn with_runner(config: Config, runner: Box<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build against the configured workspace service, authenticating with
    /// the caller's token
    pub fn build_pangenome_with_orthomcl(
        &self,
        context: &CallContext,
        params: &BuildParams,
    ) -> std::result::Result<BuildOutput, BuildFailure> {
        let client = self
            .config
            .repository
            .workspace_url
            .as_deref()
            .ok_or_else(|| PangenomeError::Config("No workspace service URL configured".to_string()))
            .and_then(|url| WorkspaceClient::new(url, context.token.clone()));

        match client {
            Ok(client) => self.build(&client, params),
            Err(err) => Err(abort(RunLog::new(), None, err)),
        }
    }

    /// Build in a fresh workspace under the configured scratch root
    pub fn build(
        &self,
        repository: &dyn ObjectRepository,
        params: &BuildParams,
    ) -> std::result::Result<BuildOutput, BuildFailure> {
        match RunWorkspace::new(METHOD_NAME, &self.config.workspace) {
            Ok(mut workspace) => self.build_in(&mut workspace, repository, params),
            Err(err) => Err(abort(RunLog::new(), None, err)),
        }
    }

    /// Build inside a caller-provided workspace
    pub fn build_in(
        &self,
        workspace: &mut RunWorkspace,
        repository: &dyn ObjectRepository,
        params: &BuildParams,
    ) -> std::result::Result<BuildOutput, BuildFailure> {
        let mut run = Run {
            config: &self.config,
            runner: self.runner.as_ref(),
            workspace: &mut *workspace,
            repository,
            log: RunLog::new(),
            stage: None,
        };
        let result = run.execute(params);
        let Run { log, stage, .. } = run;

        match result {
            Ok(pangenome_ref) => {
                if let Err(e) = workspace.mark_completed() {
                    tracing::warn!("Failed to update workspace metadata: {}", e);
                }
                Ok(BuildOutput {
                    output_log: log.into_text(),
                    pangenome_ref,
                })
            }
            Err(err) => {
                let failure = abort(log, stage, err);
                if let Err(e) = workspace.mark_error(&failure_trace(failure.stage, &failure.cause)) {
                    tracing::warn!("Failed to update workspace metadata: {}", e);
                }
                Err(failure)
            }
        }
    }
}

/// Close the transcript with the failure trace and package the failure
fn abort(mut log: RunLog, stage: Option<Stage>, cause: PangenomeError) -> BuildFailure {
    log.failure(&failure_trace(stage, &cause));
    BuildFailure {
        stage,
        events: log.events().to_vec(),
        log: log.into_text(),
        cause,
    }
}

/// State of one build in progress
struct Run<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
    workspace: &'a mut RunWorkspace,
    repository: &'a dyn ObjectRepository,
    log: RunLog,
    stage: Option<Stage>,
}

impl Run<'_> {
    fn enter(&mut self, stage: Stage, message: impl Into<String>) {
        self.stage = Some(stage);
        self.log.stage(message);
    }

    /// Run one external command, capturing its output into the transcript
    fn run_tool(&mut self, command: ToolCommand) -> Result<()> {
        tracing::debug!("{}", command.command_line());
        let output = self.runner.run(&command)?;
        self.log.capture(&output.stdout, &output.stderr);

        if !output.success {
            return Err(StageError {
                stage: self.stage.unwrap_or(Stage::FetchGenomeSet),
                program: command.tool,
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            }
            .into());
        }
        Ok(())
    }

    fn execute(&mut self, params: &BuildParams) -> Result<String> {
        let config = self.config;
        let toolchain = &config.toolchain;
        let staging_config = &config.staging;
        let orthomcl = OrthoMcl::new(toolchain);

        self.enter(Stage::FetchGenomeSet, "Loading GenomeSet object from repository");
        let genome_set: GenomeSet = fetch_as(self.repository, &params.input_genomeset_ref)?;

        self.enter(Stage::CheckGenomeCount, "Preparing genome refs");
        let genome_refs = genome_set.genome_refs();
        if genome_refs.len() > MAX_GENOMES {
            return Err(PangenomeError::TooManyGenomes {
                count: genome_refs.len(),
                limit: MAX_GENOMES,
            });
        }
        self.workspace.update_metadata(|m| m.genome_count = genome_refs.len())?;

        if let Some(command) = staging::start_service(staging_config, self.workspace) {
            self.enter(Stage::StartStaging, "Starting staging service");
            self.run_tool(command)?;
        }

        self.enter(Stage::InitSchema, "Preparing database");
        self.run_tool(staging::reset_schema(staging_config, self.workspace))?;

        self.enter(Stage::WriteConfig, "Preparing orthomcl config file");
        std::fs::write(self.workspace.orthomcl_config(), render_config(staging_config))?;

        self.enter(Stage::InstallSchema, "Running orthomclInstallSchema");
        self.run_tool(orthomcl.install_schema(self.workspace))?;

        let mut features = FeatureTable::new();
        for (position, genome_ref) in genome_refs.iter().enumerate() {
            let genome_index = position + 1;

            self.enter(
                Stage::FetchGenome { genome_index },
                format!("Loading Genome object from repository for ref [{}]", genome_ref),
            );
            let genome: Genome = fetch_as(self.repository, genome_ref)?;

            self.enter(
                Stage::ExtractProteins { genome_index },
                format!("Preparing fasta file for ref [{}]", genome_ref),
            );
            let extracted = extract_genome(genome_index, genome_ref, &genome, &mut features)?;
            extracted.write_fasta(&self.workspace.genome_fasta(genome_index))?;

            self.enter(
                Stage::AdjustFasta { genome_index },
                format!("Running orthomclAdjustFasta for ref [{}]", genome_ref),
            );
            self.run_tool(orthomcl.adjust_fasta(self.workspace, genome_index))?;
        }

        if features.is_empty() {
            tracing::warn!("No genome in the set has protein-coding features with translations");
        }

        self.enter(Stage::FilterFasta, "Running orthomclFilterFasta");
        self.run_tool(orthomcl.filter_fasta(self.workspace))?;
        match parse_fasta(self.workspace.good_proteins()) {
            Ok(curated) => {
                self.log.note(format!(
                    "{} of {} proteins kept by orthomclFilterFasta",
                    curated.len(),
                    features.len()
                ));
                self.workspace.update_metadata(|m| m.curated_count = curated.len())?;
            }
            Err(e) => tracing::warn!("Could not read curated protein set: {}", e),
        }

        self.enter(Stage::FormatDb, "Running formatdb");
        self.run_tool(blast::formatdb(toolchain, self.workspace))?;

        self.enter(Stage::Blastp, "Running blastp");
        self.run_tool(blast::blastp(toolchain, self.workspace))?;

        self.enter(Stage::ParseBlast, "Running orthomclBlastParser");
        self.run_tool(orthomcl.blast_parser(self.workspace))?;

        self.enter(Stage::LoadBlast, "Running orthomclLoadBlast");
        self.run_tool(orthomcl.load_blast(self.workspace))?;

        self.enter(Stage::Pairs, "Running orthomclPairs");
        self.run_tool(orthomcl.pairs(self.workspace))?;

        self.enter(Stage::DumpPairs, "Running orthomclDumpPairsFiles");
        self.run_tool(orthomcl.dump_pairs(self.workspace))?;

        self.enter(Stage::Mcl, "Running mcl");
        self.run_tool(mcl::cluster(toolchain, self.workspace))?;

        self.enter(Stage::MclToGroups, "Running orthomclMclToGroups");
        self.run_tool(orthomcl.mcl_to_groups(self.workspace))?;

        self.enter(Stage::ParseGroups, "Parsing groups file");
        let groups = project_groups_file(&self.workspace.groups(), &features)?;
        self.workspace.update_metadata(|m| m.group_count = groups.len())?;
        let pangenome = assembler::assemble(genome_refs, &params.output_pangenome_id, groups);

        self.enter(Stage::SavePangenome, "Saving pangenome object");
        let provenance =
            assembler::provenance(&params.input_genomeset_ref, serde_json::to_value(params)?);
        assembler::save(self.repository, &params.output_workspace, &pangenome, provenance)
    }
}
