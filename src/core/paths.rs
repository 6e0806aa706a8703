use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static PANGENOME_HOME: OnceLock<PathBuf> = OnceLock::new();
static PANGENOME_SCRATCH_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the home directory
/// Checks PANGENOME_HOME environment variable, falls back to ${HOME}/.pangenome
pub fn pangenome_home() -> PathBuf {
    PANGENOME_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("PANGENOME_HOME") {
                PathBuf::from(path)
            } else {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".pangenome")
            }
        })
        .clone()
}

/// Get the scratch directory that per-run workspaces are created under
/// Checks PANGENOME_SCRATCH_DIR environment variable, falls back to PANGENOME_HOME/scratch
pub fn pangenome_scratch_dir() -> PathBuf {
    PANGENOME_SCRATCH_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("PANGENOME_SCRATCH_DIR") {
                PathBuf::from(path)
            } else {
                pangenome_home().join("scratch")
            }
        })
        .clone()
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    pangenome_home().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_dir_is_stable() {
        assert_eq!(pangenome_scratch_dir(), pangenome_scratch_dir());
        assert!(default_config_path().ends_with("config.toml"));
    }
}
