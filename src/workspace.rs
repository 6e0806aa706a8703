//! Per-run working directory
//!
//! Every build gets its own [`RunWorkspace`]. All generated artifacts live
//! under its root and nothing is shared between runs.

use crate::core::config::WorkspaceSettings;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const COMPLIANT_FASTA_DIR: &str = "compliantFasta";
const METADATA_DIR: &str = "metadata";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceMetadata {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub command: String,
    pub status: WorkspaceStatus,
    pub error_message: Option<String>,
    pub genome_count: usize,
    /// Proteins left in the curated set after filtering
    #[serde(default)]
    pub curated_count: usize,
    pub group_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkspaceStatus {
    Active,
    Completed,
    Failed,
}

#[derive(Debug)]
pub struct RunWorkspace {
    pub id: String,
    pub root: PathBuf,
    preserve_on_failure: bool,
    preserve_always: bool,
    had_error: bool,
    metadata: WorkspaceMetadata,
}

impl RunWorkspace {
    /// Create a fresh workspace with a unique directory under the scratch root
    pub fn new(command: &str, settings: &WorkspaceSettings) -> Result<Self> {
        fs::create_dir_all(&settings.scratch_root)?;
        let id = format!("{}_{}", Utc::now().timestamp(), Uuid::new_v4());
        let root = settings.scratch_root.join(&id);
        Self::create(id, root, command, settings)
    }

    /// Use `root` as the workspace, removing whatever a previous run left there
    pub fn reset(root: &Path, command: &str, settings: &WorkspaceSettings) -> Result<Self> {
        if root.exists() {
            fs::remove_dir_all(root)?;
        }
        let id = root
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self::create(id, root.to_path_buf(), command, settings)
    }

    fn create(id: String, root: PathBuf, command: &str, settings: &WorkspaceSettings) -> Result<Self> {
        fs::create_dir_all(root.join(COMPLIANT_FASTA_DIR))?;
        fs::create_dir_all(root.join(METADATA_DIR))?;

        let workspace = Self {
            metadata: WorkspaceMetadata {
                id: id.clone(),
                created_at: Utc::now(),
                command: command.to_string(),
                status: WorkspaceStatus::Active,
                error_message: None,
                genome_count: 0,
                curated_count: 0,
                group_count: 0,
            },
            id,
            root,
            preserve_on_failure: settings.preserve_on_failure,
            preserve_always: settings.preserve_always,
            had_error: false,
        };
        workspace.save_metadata()?;
        tracing::debug!("Created workspace {:?}", workspace.root);
        Ok(workspace)
    }

    pub fn orthomcl_config(&self) -> PathBuf {
        self.root.join("orthomcl.cfg")
    }

    pub fn compliant_fasta_dir(&self) -> PathBuf {
        self.root.join(COMPLIANT_FASTA_DIR)
    }

    /// FASTA written by extraction for one genome
    pub fn genome_fasta(&self, genome_index: usize) -> PathBuf {
        self.root.join(format!("{}.fasta", genome_index))
    }

    /// Curated protein set written by the filter stage
    pub fn good_proteins(&self) -> PathBuf {
        self.root.join("goodProteins.fasta")
    }

    pub fn blast_output(&self) -> PathBuf {
        self.root.join("blastres.txt")
    }

    pub fn similar_sequences(&self) -> PathBuf {
        self.root.join("similarSequences.txt")
    }

    pub fn pairs_log(&self) -> PathBuf {
        self.root.join("orthomcl_pairs.log")
    }

    /// Edge list written by the pair dump stage
    pub fn mcl_input(&self) -> PathBuf {
        self.root.join("mclInput")
    }

    pub fn mcl_output(&self) -> PathBuf {
        self.root.join("mclOutput")
    }

    pub fn groups(&self) -> PathBuf {
        self.root.join("groups.txt")
    }

    pub fn metadata(&self) -> &WorkspaceMetadata {
        &self.metadata
    }

    pub fn update_metadata<F>(&mut self, updater: F) -> Result<()>
    where
        F: FnOnce(&mut WorkspaceMetadata),
    {
        updater(&mut self.metadata);
        self.save_metadata()
    }

    fn save_metadata(&self) -> Result<()> {
        let path = self.root.join(METADATA_DIR).join("workspace.json");
        fs::write(path, serde_json::to_string_pretty(&self.metadata)?)?;
        Ok(())
    }

    pub fn mark_error(&mut self, error: &str) -> Result<()> {
        self.had_error = true;
        self.update_metadata(|m| {
            m.status = WorkspaceStatus::Failed;
            m.error_message = Some(error.to_string());
        })
    }

    pub fn mark_completed(&mut self) -> Result<()> {
        self.update_metadata(|m| m.status = WorkspaceStatus::Completed)
    }

    fn should_preserve(&self) -> bool {
        self.preserve_always || (self.preserve_on_failure && self.had_error)
    }
}

impl Drop for RunWorkspace {
    fn drop(&mut self) {
        if self.should_preserve() {
            eprintln!("Workspace preserved at: {:?}", self.root);
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.root) {
            tracing::warn!("Failed to clean up workspace {:?}: {}", self.root, e);
        }
    }
}
