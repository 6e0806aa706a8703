use crate::repository::traits::{ObjectInfo, ObjectRepository, ObjectSpec};
use crate::{PangenomeError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory object repository
#[derive(Default)]
pub struct MemoryRepository {
    objects: Mutex<HashMap<String, Value>>,
    saved: Mutex<Vec<(String, ObjectSpec)>>,
    fetches: Mutex<Vec<String>>,
    fail_saves: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(self, reference: &str, data: Value) -> Self {
        self.insert(reference, data);
        self
    }

    /// Make every save fail
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn insert(&self, reference: &str, data: Value) {
        if let Ok(mut objects) = self.objects.lock() {
            objects.insert(reference.to_string(), data);
        }
    }

    /// `(workspace, object)` pairs saved so far
    pub fn saved(&self) -> Vec<(String, ObjectSpec)> {
        self.saved.lock().map(|saved| saved.clone()).unwrap_or_default()
    }

    /// References fetched so far, in order
    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

impl ObjectRepository for MemoryRepository {
    fn fetch(&self, reference: &str) -> Result<Value> {
        if let Ok(mut fetches) = self.fetches.lock() {
            fetches.push(reference.to_string());
        }
        self.objects
            .lock()
            .map_err(|_| PangenomeError::Repository("repository lock poisoned".to_string()))?
            .get(reference)
            .cloned()
            .ok_or_else(|| PangenomeError::Repository(format!("Object {} not found", reference)))
    }

    fn save(&self, workspace: &str, object: &ObjectSpec) -> Result<ObjectInfo> {
        if self.fail_saves {
            return Err(PangenomeError::Repository(format!(
                "Workspace {} is read-only",
                workspace
            )));
        }

        let mut saved = self
            .saved
            .lock()
            .map_err(|_| PangenomeError::Repository("repository lock poisoned".to_string()))?;

        let mut names: Vec<&str> = Vec::new();
        for (ws, spec) in saved.iter() {
            if ws == workspace && !names.contains(&spec.name.as_str()) {
                names.push(spec.name.as_str());
            }
        }
        let object_id = names
            .iter()
            .position(|name| *name == object.name)
            .unwrap_or(names.len()) as u64
            + 1;
        let version = saved
            .iter()
            .filter(|(ws, spec)| ws == workspace && spec.name == object.name)
            .count() as u64
            + 1;

        saved.push((workspace.to_string(), object.clone()));

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
