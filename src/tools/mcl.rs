//! Markov clustering of the pair graph

use crate::core::config::ToolchainConfig;
use crate::tools::traits::ToolCommand;
use crate::workspace::RunWorkspace;

pub const MCL_INFLATION: &str = "1.5";

/// Cluster the `(node, node, weight)` edge list written by the pair dump
pub fn cluster(toolchain: &ToolchainConfig, workspace: &RunWorkspace) -> ToolCommand {
    ToolCommand::new("mcl", &toolchain.mcl, &workspace.root)
        .path_arg(&workspace.mcl_input())
        .arg("--abc")
        .arg("-I")
        .arg(MCL_INFLATION)
        .arg("-o")
        .path_arg(&workspace.mcl_output())
}
