/// Shared fixtures for the pipeline integration tests
use pangenome_orthomcl::core::config::{Config, WorkspaceSettings};
use pangenome_orthomcl::BuildParams;
use serde_json::{json, Value};
use std::path::Path;

pub const GENOME_SET_REF: &str = "input_ws/genome_set/1";
pub const OUTPUT_WORKSPACE: &str = "out_ws";
pub const OUTPUT_NAME: &str = "my_pangenome";

/// A feature as `(id, type, translation, function)`
pub type FeatureSpec<'a> = (&'a str, &'a str, Option<&'a str>, Option<&'a str>);

pub fn genome(id: &str, features: &[FeatureSpec]) -> Value {
    let features: Vec<Value> = features
        .iter()
        .map(|(fid, kind, translation, function)| {
            let mut feature = json!({"id": fid, "type": kind, "function": function});
            if let Some(translation) = translation {
                feature["protein_translation"] = json!(translation);
            }
            feature
        })
        .collect();
    json!({"id": id, "scientific_name": "Test organism", "features": features})
}

pub fn genome_set(refs: &[&str]) -> Value {
    let mut elements = serde_json::Map::new();
    for (i, reference) in refs.iter().enumerate() {
        elements.insert(format!("param{}", i), json!({"ref": reference}));
    }
    json!({"description": "test set", "elements": elements})
}

pub fn workspace_settings(root: &Path) -> WorkspaceSettings {
    WorkspaceSettings {
        scratch_root: root.to_path_buf(),
        preserve_on_failure: false,
        preserve_always: false,
    }
}

pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.workspace = workspace_settings(root);
    config
}

pub fn params() -> BuildParams {
    BuildParams {
        input_genomeset_ref: GENOME_SET_REF.to_string(),
        output_pangenome_id: OUTPUT_NAME.to_string(),
        output_workspace: OUTPUT_WORKSPACE.to_string(),
    }
}
