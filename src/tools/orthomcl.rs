//! OrthoMCL script invocations and configuration file
//!
//! The cutoffs below are fixed for every run; there is deliberately no way to
//! override them from configuration.

use crate::core::config::{StagingConfig, ToolchainConfig};
use crate::tools::traits::ToolCommand;
use crate::workspace::RunWorkspace;

pub const PERCENT_MATCH_CUTOFF: u32 = 50;
pub const EVALUE_EXPONENT_CUTOFF: i32 = -5;

/// Header field that orthomclAdjustFasta takes the protein id from
pub const ADJUST_FASTA_ID_FIELD: u32 = 1;
/// orthomclFilterFasta minimum protein length
pub const FILTER_MIN_LENGTH: u32 = 50;
/// orthomclFilterFasta maximum percent stop codons
pub const FILTER_MAX_PERCENT_STOPS: u32 = 10;

pub const GROUP_PREFIX: &str = "grp";
pub const GROUP_START_NUMBER: u32 = 1000;

/// Render `orthomcl.cfg` for the given staging store
pub fn render_config(staging: &StagingConfig) -> String {
    let entries = [
        ("dbVendor", staging.vendor.clone()),
        ("dbConnectString", staging.connect_string()),
        ("dbLogin", staging.login.clone()),
        ("dbPassword", staging.password.clone()),
        ("similarSequencesTable", "SimilarSequences".to_string()),
        ("orthologTable", "Ortholog".to_string()),
        ("inParalogTable", "InParalog".to_string()),
        ("coOrthologTable", "CoOrtholog".to_string()),
        ("interTaxonMatchView", "InterTaxonMatch".to_string()),
        ("percentMatchCutoff", PERCENT_MATCH_CUTOFF.to_string()),
        ("evalueExponentCutoff", EVALUE_EXPONENT_CUTOFF.to_string()),
        ("oracleIndexTblSpc", "NONE".to_string()),
    ];

    entries
        .iter()
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect()
}

/// Builds the perl invocations of the OrthoMCL scripts
pub struct OrthoMcl<'a> {
    toolchain: &'a ToolchainConfig,
}

impl<'a> OrthoMcl<'a> {
    pub fn new(toolchain: &'a ToolchainConfig) -> Self {
        Self { toolchain }
    }

    fn script(&self, name: &str, workspace: &RunWorkspace) -> ToolCommand {
        let script = self.toolchain.orthomcl_bin_dir.join(name);
        ToolCommand::new(name, &self.toolchain.perl, &workspace.root).path_arg(&script)
    }

    pub fn install_schema(&self, workspace: &RunWorkspace) -> ToolCommand {
        self.script("orthomclInstallSchema", workspace)
            .path_arg(&workspace.orthomcl_config())
    }

    /// Rewrite one genome's FASTA headers to `<genomeIndex>|<featureIndex>`
    pub fn adjust_fasta(&self, workspace: &RunWorkspace, genome_index: usize) -> ToolCommand {
        let mut command = self
            .script("orthomclAdjustFasta", workspace)
            .arg(genome_index.to_string())
            .path_arg(&workspace.genome_fasta(genome_index))
            .arg(ADJUST_FASTA_ID_FIELD.to_string());
        command.cwd = workspace.compliant_fasta_dir();
        command
    }

    pub fn filter_fasta(&self, workspace: &RunWorkspace) -> ToolCommand {
        self.script("orthomclFilterFasta", workspace)
            .path_arg(&workspace.compliant_fasta_dir())
            .arg(FILTER_MIN_LENGTH.to_string())
            .arg(FILTER_MAX_PERCENT_STOPS.to_string())
    }

    pub fn blast_parser(&self, workspace: &RunWorkspace) -> ToolCommand {
        self.script("orthomclBlastParser", workspace)
            .path_arg(&workspace.blast_output())
            .path_arg(&workspace.compliant_fasta_dir())
            .stdout_to(&workspace.similar_sequences())
    }

    pub fn load_blast(&self, workspace: &RunWorkspace) -> ToolCommand {
        self.script("orthomclLoadBlast", workspace)
            .path_arg(&workspace.orthomcl_config())
            .path_arg(&workspace.similar_sequences())
    }

    /// Intermediate tables are kept so the dump stage can read them
    pub fn pairs(&self, workspace: &RunWorkspace) -> ToolCommand {
        self.script("orthomclPairs", workspace)
            .path_arg(&workspace.orthomcl_config())
            .path_arg(&workspace.pairs_log())
            .arg("cleanup=no")
    }

    /// Writes `mclInput` and the pair files into the workspace root
    pub fn dump_pairs(&self, workspace: &RunWorkspace) -> ToolCommand {
        self.script("orthomclDumpPairsFiles", workspace)
            .path_arg(&workspace.orthomcl_config())
    }

    pub fn mcl_to_groups(&self, workspace: &RunWorkspace) -> ToolCommand {
        self.script("orthomclMclToGroups", workspace)
            .arg(GROUP_PREFIX)
            .arg(GROUP_START_NUMBER.to_string())
            .stdin_from(&workspace.mcl_output())
            .stdout_to(&workspace.groups())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WorkspaceSettings;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_render_config() {
        let rendered = render_config(&StagingConfig::default());
        assert_eq!(
            rendered,
            "dbVendor=mysql\n\
             dbConnectString=dbi:mysql:orthomcl:mysql_local_infile=1:localhost:3306\n\
             dbLogin=root\n\
             dbPassword=12345\n\
             similarSequencesTable=SimilarSequences\n\
             orthologTable=Ortholog\n\
             inParalogTable=InParalog\n\
             coOrthologTable=CoOrtholog\n\
             interTaxonMatchView=InterTaxonMatch\n\
             percentMatchCutoff=50\n\
             evalueExponentCutoff=-5\n\
             oracleIndexTblSpc=NONE\n"
        );
    }

    #[test]
    fn test_adjust_fasta_runs_in_compliant_dir() {
        let dir = TempDir::new().unwrap();
        let settings = WorkspaceSettings {
            scratch_root: dir.path().to_path_buf(),
            preserve_on_failure: false,
            preserve_always: false,
        };
        let workspace = RunWorkspace::new("test", &settings).unwrap();
        let toolchain = ToolchainConfig {
            orthomcl_bin_dir: PathBuf::from("/opt/orthomcl/bin"),
            ..ToolchainConfig::default()
        };

        let command = OrthoMcl::new(&toolchain).adjust_fasta(&workspace, 3);
        assert_eq!(command.tool, "orthomclAdjustFasta");
        assert_eq!(command.program, "perl");
        assert_eq!(command.cwd, workspace.compliant_fasta_dir());
        assert_eq!(
            command.args,
            vec![
                "/opt/orthomcl/bin/orthomclAdjustFasta".to_string(),
                "3".to_string(),
                workspace.genome_fasta(3).to_string_lossy().to_string(),
                "1".to_string(),
            ]
        );
    }
}
