use crate::core::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub toolchain: ToolchainConfig,
    pub staging: StagingConfig,
    pub workspace: WorkspaceSettings,
    pub repository: RepositoryConfig,
}

/// Locations of the external executables the pipeline drives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Directory holding the orthomcl* perl scripts
    pub orthomcl_bin_dir: PathBuf,
    pub perl: String,
    pub formatdb: String,
    pub blastall: String,
    pub mcl: String,
}

/// Connection settings for the relational staging store used by OrthoMCL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    pub vendor: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub login: String,
    pub password: String,
    /// Client executable used to reset the staging database
    pub client: String,
    /// Command that brings the staging service up; skipped when empty
    pub start_command: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// Root under which per-run workspaces are created
    pub scratch_root: PathBuf,
    /// Keep the workspace of a failed run for inspection
    pub preserve_on_failure: bool,
    /// Keep every workspace
    pub preserve_always: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Workspace service endpoint; `None` means a local repository must be given
    pub workspace_url: Option<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            orthomcl_bin_dir: PathBuf::from("/kb/deployment/plbin"),
            perl: "perl".to_string(),
            formatdb: "formatdb".to_string(),
            blastall: "blastall".to_string(),
            mcl: "mcl".to_string(),
        }
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            vendor: "mysql".to_string(),
            host: "localhost".to_string(),
            port: 3306,
            database: "orthomcl".to_string(),
            login: "root".to_string(),
            password: "12345".to_string(),
            client: "mysql".to_string(),
            start_command: vec![
                "service".to_string(),
                "mysql".to_string(),
                "start".to_string(),
            ],
        }
    }
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            scratch_root: paths::pangenome_scratch_dir(),
            preserve_on_failure: std::env::var("PANGENOME_PRESERVE_ON_FAILURE").is_ok(),
            preserve_always: std::env::var("PANGENOME_PRESERVE_ALWAYS").is_ok(),
        }
    }
}

impl StagingConfig {
    /// Perl DBI connect string understood by the OrthoMCL scripts
    pub fn connect_string(&self) -> String {
        format!(
            "dbi:{}:{}:mysql_local_infile=1:{}:{}",
            self.vendor, self.database, self.host, self.port
        )
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::PangenomeError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::PangenomeError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::PangenomeError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::PangenomeError::Config(format!("Failed to serialize config: {}", e)))?;
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_connect_string() {
        let staging = StagingConfig::default();
        assert_eq!(
            staging.connect_string(),
            "dbi:mysql:orthomcl:mysql_local_infile=1:localhost:3306"
        );
    }

    #[test]
    fn test_config_roundtrip_through_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = default_config();
        config.toolchain.mcl = "/opt/mcl/bin/mcl".to_string();
        config.staging.start_command.clear();
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.toolchain.mcl, "/opt/mcl/bin/mcl");
        assert!(loaded.staging.start_command.is_empty());
        assert_eq!(loaded.staging.database, "orthomcl");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[staging]\npassword = \"secret\"\n").unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.staging.password, "secret");
        assert_eq!(loaded.staging.login, "root");
        assert_eq!(loaded.toolchain.perl, "perl");
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[staging\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
