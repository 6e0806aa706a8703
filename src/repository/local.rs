use crate::repository::traits::{ObjectInfo, ObjectRepository, ObjectSpec};
use crate::{PangenomeError, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

const INDEX_FILE: &str = "index.json";

/// A repository backed by a directory of JSON files.
///
/// A reference `a/b/c` resolves to `<root>/a/b/c.json`. Saved objects land at
/// `<root>/<workspace>/<objectId>/<version>.json`, so the reference returned
/// by a save can be fetched back.
pub struct LocalRepository {
    root: PathBuf,
    // Serializes index updates within this process
    lock: Mutex<()>,
}

impl LocalRepository {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, reference: &str) -> Result<PathBuf> {
        let relative = contained(reference, "object reference")?;
        let mut path = self.root.join(relative);
        let file_name = format!(
            "{}.json",
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default()
        );
        path.set_file_name(file_name);
        Ok(path)
    }

    /// Store a JSON payload under `reference`, e.g. to seed inputs
    pub fn put(&self, reference: &str, data: &Value) -> Result<PathBuf> {
        let path = self.object_path(reference)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(data)?)?;
        Ok(path)
    }
}

/// `value` as a relative path that cannot leave the repository root
fn contained<'a>(value: &'a str, what: &str) -> Result<&'a Path> {
    let relative = Path::new(value);
    let safe = !value.is_empty()
        && relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if !safe {
        return Err(PangenomeError::Repository(format!("Invalid {}: {}", what, value)));
    }
    Ok(relative)
}

impl ObjectRepository for LocalRepository {
    fn fetch(&self, reference: &str) -> Result<Value> {
        let path = self.object_path(reference)?;
        let contents = fs::read_to_string(&path).map_err(|e| {
            PangenomeError::Repository(format!("Object {} not found at {:?}: {}", reference, path, e))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, workspace: &str, object: &ObjectSpec) -> Result<ObjectInfo> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| PangenomeError::Repository("repository lock poisoned".to_string()))?;

        let name = contained(workspace, "workspace name")?;
        if name.components().count() != 1 {
            return Err(PangenomeError::Repository(format!(
                "Invalid workspace name: {}",
                workspace
            )));
        }
        let workspace_dir = self.root.join(name);
        fs::create_dir_all(&workspace_dir)?;

        // name -> object id, in creation order
        let index_path = workspace_dir.join(INDEX_FILE);
        let mut index: IndexMap<String, u64> = if index_path.exists() {
            serde_json::from_str(&fs::read_to_string(&index_path)?)?
        } else {
            IndexMap::new()
        };
        let next_id = index.values().copied().max().unwrap_or(0) + 1;
        let object_id = *index.entry(object.name.clone()).or_insert(next_id);
        fs::write(&index_path, serde_json::to_string_pretty(&index)?)?;

        let object_dir = workspace_dir.join(object_id.to_string());
        fs::create_dir_all(&object_dir)?;
        let version = fs::read_dir(&object_dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                name.ends_with(".json") && !name.ends_with(".provenance.json")
            })
            .count() as u64
            + 1;

        fs::write(
            object_dir.join(format!("{}.json", version)),
            serde_json::to_string_pretty(&object.data)?,
        )?;
        fs::write(
            object_dir.join(format!("{}.provenance.json", version)),
            serde_json::to_string_pretty(&object.provenance)?,
        )?;

        Ok(ObjectInfo {
            object_id,
            name: object.name.clone(),
            type_name: object.type_name.clone(),
            version,
            workspace_id: workspace.to_string(),
            workspace_name: workspace.to_string(),
        })
    }
}
