use crate::types::pangenome::Provenance;
use crate::{PangenomeError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An object to be saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    pub data: Value,
    pub provenance: Vec<Provenance>,
}

/// Identifying information returned by a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub object_id: u64,
    pub name: String,
    pub type_name: String,
    pub version: u64,
    pub workspace_id: String,
    pub workspace_name: String,
}

impl ObjectInfo {
    /// Versioned reference `<workspaceId>/<objectId>/<version>`
    pub fn reference(&self) -> String {
        format!("{}/{}/{}", self.workspace_id, self.object_id, self.version)
    }

    /// Decode the positional object-info tuple used by the workspace service:
    /// `[objid, name, type, save_date, version, saved_by, wsid, workspace, ...]`
    pub fn from_tuple(value: &Value) -> Result<Self> {
        let fields = value
            .as_array()
            .ok_or_else(|| PangenomeError::Repository("object info is not a list".to_string()))?;
        let number = |index: usize| {
            fields
                .get(index)
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    PangenomeError::Repository(format!("object info field {} is not a number", index))
                })
        };
        let text = |index: usize| {
            fields
                .get(index)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default()
        };

        Ok(Self {
            object_id: number(0)?,
            name: text(1),
            type_name: text(2),
            version: number(4)?,
            workspace_id: number(6)?.to_string(),
            workspace_name: text(7),
        })
    }
}

/// Fetch/save access to stored objects
pub trait ObjectRepository: Send + Sync {
    /// Data payload of the object behind `reference`
    fn fetch(&self, reference: &str) -> Result<Value>;

    /// Save `object` into `workspace`
    fn save(&self, workspace: &str, object: &ObjectSpec) -> Result<ObjectInfo>;
}

/// Fetch an object and deserialize its payload
pub fn fetch_as<T: DeserializeOwned>(repository: &dyn ObjectRepository, reference: &str) -> Result<T> {
    let data = repository.fetch(reference)?;
    serde_json::from_value(data).map_err(|e| {
        PangenomeError::Repository(format!("Object {} has unexpected shape: {}", reference, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_info_tuple_reference() {
        let tuple = json!([
            12, "pg", "KBaseGenomes.Pangenome-1.0", "2024-01-01T00:00:00+0000", 3,
            "someone", 4567, "my_ws", "abc", 100, {}
        ]);
        let info = ObjectInfo::from_tuple(&tuple).unwrap();
        assert_eq!(info.reference(), "4567/12/3");
        assert_eq!(info.name, "pg");
        assert_eq!(info.workspace_name, "my_ws");
    }

    #[test]
    fn test_info_tuple_must_be_list() {
        assert!(ObjectInfo::from_tuple(&json!({"id": 1})).is_err());
    }
}
