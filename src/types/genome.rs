//! Repository payloads consumed by the pipeline
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! stored objects is ignored on deserialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Feature type that takes part in clustering
pub const CODING_FEATURE_TYPE: &str = "CDS";

/// A keyed collection of genome references
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenomeSet {
    #[serde(default)]
    pub description: Option<String>,
    /// Insertion order is the genome index order
    #[serde(default)]
    pub elements: IndexMap<String, GenomeSetElement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeSetElement {
    #[serde(rename = "ref")]
    pub reference: String,
}

impl GenomeSet {
    /// Genome references in element order
    pub fn genome_refs(&self) -> Vec<String> {
        self.elements
            .values()
            .map(|element| element.reference.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Genome {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    #[serde(rename = "type", default)]
    pub feature_type: String,
    #[serde(default)]
    pub protein_translation: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
}

impl Feature {
    /// Whether this feature is a protein-coding call with a usable translation
    pub fn is_coding(&self) -> bool {
        self.feature_type == CODING_FEATURE_TYPE && self.translation().is_some()
    }

    /// Non-empty protein translation
    pub fn translation(&self) -> Option<&str> {
        self.protein_translation
            .as_deref()
            .filter(|translation| !translation.is_empty())
    }

    /// Functional annotation, with a missing value read as empty
    pub fn function_or_empty(&self) -> &str {
        self.function.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_genome_set_preserves_element_order() {
        let set: GenomeSet = serde_json::from_value(json!({
            "description": "three strains",
            "elements": {
                "zeta": {"ref": "1/5/1"},
                "alpha": {"ref": "1/2/1"},
                "mid": {"ref": "1/9/3"}
            }
        }))
        .unwrap();

        assert_eq!(set.genome_refs(), vec!["1/5/1", "1/2/1", "1/9/3"]);
    }

    #[test]
    fn test_feature_participation() {
        let genome: Genome = serde_json::from_value(json!({
            "id": "g",
            "features": [
                {"id": "a", "type": "CDS", "protein_translation": "MKV", "function": "kinase"},
                {"id": "b", "type": "gene", "protein_translation": "MKV"},
                {"id": "c", "type": "CDS"},
                {"id": "d", "type": "CDS", "protein_translation": ""},
                {"id": "e", "type": "CDS", "protein_translation": "MA", "function": null}
            ]
        }))
        .unwrap();

        let coding: Vec<&str> = genome
            .features
            .iter()
            .filter(|f| f.is_coding())
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(coding, vec!["a", "e"]);
        assert_eq!(genome.features[4].function_or_empty(), "");
    }
}
