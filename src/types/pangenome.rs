use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type tag stored on every pangenome built by this crate
pub const PANGENOME_TYPE_TAG: &str = "orthomcl";

/// The persisted result of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pangenome {
    pub genome_refs: Vec<String>,
    pub id: String,
    pub name: String,
    pub orthologs: Vec<OrthologGroup>,
    #[serde(rename = "type")]
    pub pangenome_type: String,
}

/// One orthologous group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrthologGroup {
    pub function: String,
    pub id: String,
    pub orthologs: Vec<OrthologMember>,
}

/// A cluster member projected back to its source feature.
///
/// Serialized as `[feature_id, feature_position, genome_ref]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrthologMember(pub String, pub usize, pub String);

impl OrthologMember {
    pub fn feature_id(&self) -> &str {
        &self.0
    }

    pub fn feature_position(&self) -> usize {
        self.1
    }

    pub fn genome_ref(&self) -> &str {
        &self.2
    }
}

/// Provenance attached to a saved object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub service: String,
    pub method: String,
    pub service_ver: String,
    pub input_ws_objects: Vec<String>,
    pub description: String,
    pub method_params: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_pangenome_shape() {
        let pangenome = Pangenome {
            genome_refs: vec!["1/2/3".to_string()],
            id: "pg".to_string(),
            name: "pg".to_string(),
            orthologs: vec![OrthologGroup {
                function: "kinase".to_string(),
                id: "cluster1".to_string(),
                orthologs: vec![OrthologMember("g1f1".to_string(), 0, "1/2/3".to_string())],
            }],
            pangenome_type: PANGENOME_TYPE_TAG.to_string(),
        };

        assert_eq!(
            serde_json::to_value(&pangenome).unwrap(),
            json!({
                "genome_refs": ["1/2/3"],
                "id": "pg",
                "name": "pg",
                "orthologs": [{
                    "function": "kinase",
                    "id": "cluster1",
                    "orthologs": [["g1f1", 0, "1/2/3"]]
                }],
                "type": "orthomcl"
            })
        );
    }
}
