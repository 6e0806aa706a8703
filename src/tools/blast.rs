//! Legacy NCBI BLAST invocations (formatdb / blastall)

use crate::core::config::ToolchainConfig;
use crate::tools::traits::ToolCommand;
use crate::workspace::RunWorkspace;

pub const BLAST_EVALUE: &str = "1e-5";
/// Hits and alignments kept per query; large enough to be exhaustive
pub const MAX_HITS: &str = "100000";
/// Tabular output format
pub const TABULAR_FORMAT: &str = "8";
pub const BLAST_THREADS: &str = "1";

/// Index the curated protein set
pub fn formatdb(toolchain: &ToolchainConfig, workspace: &RunWorkspace) -> ToolCommand {
    ToolCommand::new("formatdb", &toolchain.formatdb, &workspace.root)
        .arg("-i")
        .arg(good_proteins_name(workspace))
}

/// All-against-all blastp of the curated protein set against itself
pub fn blastp(toolchain: &ToolchainConfig, workspace: &RunWorkspace) -> ToolCommand {
    let db = good_proteins_name(workspace);
    ToolCommand::new("blastp", &toolchain.blastall, &workspace.root)
        .arg("-p")
        .arg("blastp")
        .arg("-d")
        .arg(db.clone())
        .arg("-i")
        .arg(db)
        .arg("-F")
        .arg("m S")
        .arg("-v")
        .arg(MAX_HITS)
        .arg("-b")
        .arg(MAX_HITS)
        .arg("-e")
        .arg(BLAST_EVALUE)
        .arg("-m")
        .arg(TABULAR_FORMAT)
        .arg("-a")
        .arg(BLAST_THREADS)
        .stdout_to(&workspace.blast_output())
}

// formatdb names its index files after the -i argument, so it is passed
// relative to the workspace root.
fn good_proteins_name(workspace: &RunWorkspace) -> String {
    workspace
        .good_proteins()
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
