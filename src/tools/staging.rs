//! Staging store lifecycle
//!
//! The relational store is only ever touched through its service and client
//! executables; the pipeline has no database driver of its own.

use crate::core::config::StagingConfig;
use crate::tools::traits::ToolCommand;
use crate::workspace::RunWorkspace;

/// Bring the staging service up, if a start command is configured
pub fn start_service(staging: &StagingConfig, workspace: &RunWorkspace) -> Option<ToolCommand> {
    let (program, args) = staging.start_command.split_first()?;
    let command = args.iter().fold(
        ToolCommand::new("start-staging", program, &workspace.root),
        |command, arg| command.arg(arg.clone()),
    );
    Some(command)
}

/// Drop and recreate the staging database
pub fn reset_schema(staging: &StagingConfig, workspace: &RunWorkspace) -> ToolCommand {
    ToolCommand::new("init-schema", &staging.client, &workspace.root)
        .arg(format!("--host={}", staging.host))
        .arg(format!("--port={}", staging.port))
        .arg(format!("--user={}", staging.login))
        .arg(format!("--password={}", staging.password))
        .arg("-e")
        .arg(format!(
            "DROP DATABASE IF EXISTS {db}; CREATE DATABASE {db}",
            db = staging.database
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WorkspaceSettings;
    use tempfile::TempDir;

    fn workspace(dir: &TempDir) -> RunWorkspace {
        let settings = WorkspaceSettings {
            scratch_root: dir.path().to_path_buf(),
            preserve_on_failure: false,
            preserve_always: false,
        };
        RunWorkspace::new("test", &settings).unwrap()
    }

    #[test]
    fn test_start_service_optional() {
        let dir = TempDir::new().unwrap();
        let workspace = workspace(&dir);

        let command = start_service(&StagingConfig::default(), &workspace).unwrap();
        assert_eq!(command.program, "service");
        assert_eq!(command.args, vec!["mysql", "start"]);

        let staging = StagingConfig {
            start_command: Vec::new(),
            ..StagingConfig::default()
        };
        assert!(start_service(&staging, &workspace).is_none());
    }

    #[test]
    fn test_reset_schema_drops_then_creates() {
        let dir = TempDir::new().unwrap();
        let command = reset_schema(&StagingConfig::default(), &workspace(&dir));
        assert_eq!(
            command.args.last().map(String::as_str),
            Some("DROP DATABASE IF EXISTS orthomcl; CREATE DATABASE orthomcl")
        );
    }
}
