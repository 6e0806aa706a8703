//! Final record assembly and persistence

use crate::repository::traits::{ObjectRepository, ObjectSpec};
use crate::types::pangenome::{OrthologGroup, Pangenome, Provenance, PANGENOME_TYPE_TAG};
use crate::Result;
use chrono::Utc;
use serde_json::Value;

pub const SERVICE_NAME: &str = "PangenomeOrthomcl";
pub const SERVICE_VERSION: &str = "0.1";
pub const METHOD_NAME: &str = "build_pangenome_with_orthomcl";
pub const OBJECT_TYPE: &str = "KBaseGenomes.Pangenome";
const DESCRIPTION: &str = "Orthologous groups construction using OrthoMCL tool";

/// Wrap genome references and groups into the persisted record.
///
/// `output_name` is used as both id and name.
pub fn assemble(genome_refs: Vec<String>, output_name: &str, groups: Vec<OrthologGroup>) -> Pangenome {
    Pangenome {
        genome_refs,
        id: output_name.to_string(),
        name: output_name.to_string(),
        orthologs: groups,
        pangenome_type: PANGENOME_TYPE_TAG.to_string(),
    }
}

pub fn provenance(input_genomeset_ref: &str, params: Value) -> Provenance {
    Provenance {
        service: SERVICE_NAME.to_string(),
        method: METHOD_NAME.to_string(),
        service_ver: SERVICE_VERSION.to_string(),
        input_ws_objects: vec![input_genomeset_ref.to_string()],
        description: DESCRIPTION.to_string(),
        method_params: vec![params],
        time: Some(Utc::now().to_rfc3339()),
    }
}

/// Save the pangenome and return its `<workspaceId>/<objectId>/<version>` reference
pub fn save(
    repository: &dyn ObjectRepository,
    workspace: &str,
    pangenome: &Pangenome,
    provenance: Provenance,
) -> Result<String> {
    let object = ObjectSpec {
        type_name: OBJECT_TYPE.to_string(),
        name: pangenome.name.clone(),
        data: serde_json::to_value(pangenome)?,
        provenance: vec![provenance],
    };
    let info = repository.save(workspace, &object)?;
    Ok(info.reference())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryRepository;
    use serde_json::json;

    #[test]
    fn test_assemble_uses_name_for_id() {
        let pangenome = assemble(vec!["1/1/1".to_string()], "my_pg", Vec::new());
        assert_eq!(pangenome.id, "my_pg");
        assert_eq!(pangenome.name, "my_pg");
        assert_eq!(pangenome.pangenome_type, "orthomcl");
    }

    #[test]
    fn test_save_attaches_provenance() {
        let repo = MemoryRepository::new();
        let pangenome = assemble(vec!["1/1/1".to_string()], "my_pg", Vec::new());
        let params = json!({"input_genomeset_ref": "1/9/1"});

        let reference = save(&repo, "out_ws", &pangenome, provenance("1/9/1", params.clone())).unwrap();
        assert_eq!(reference, "out_ws/1/1");

        let saved = repo.saved();
        assert_eq!(saved.len(), 1);
        let (workspace, object) = &saved[0];
        assert_eq!(workspace, "out_ws");
        assert_eq!(object.type_name, OBJECT_TYPE);
        assert_eq!(object.provenance[0].input_ws_objects, vec!["1/9/1"]);
        assert_eq!(object.provenance[0].method_params, vec![params]);
        assert_eq!(object.data["type"], "orthomcl");
    }
}
