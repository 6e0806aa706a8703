//! Protein extraction from genome records
//!
//! Walks a genome's features in order, keeps protein-coding features with a
//! translation, assigns each a running 1-based feature index, and records how
//! to project the resulting synthetic id back onto the source feature.

use crate::bio::fasta::write_fasta;
use crate::bio::sequence::Sequence;
use crate::pipeline::ids::SyntheticId;
use crate::types::genome::Genome;
use crate::{PangenomeError, Result};
use std::collections::HashMap;
use std::path::Path;

/// What the projector needs to know about one participating feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInfo {
    pub feature_id: String,
    /// 0-based position in the genome's full feature list
    pub feature_position: usize,
    pub genome_ref: String,
    /// Functional annotation, empty when the feature has none
    pub function: String,
}

/// Side table from synthetic id to source feature.
///
/// Lookups fail with [`PangenomeError::UnknownSyntheticId`] instead of
/// defaulting: an absent id means the toolchain output and the extraction
/// disagree.
#[derive(Debug, Default, Clone)]
pub struct FeatureTable {
    entries: HashMap<SyntheticId, FeatureInfo>,
}

impl FeatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: SyntheticId, info: FeatureInfo) -> Result<()> {
        if self.entries.contains_key(&id) {
            return Err(PangenomeError::InvalidIndex(format!(
                "synthetic id {} assigned twice",
                id
            )));
        }
        self.entries.insert(id, info);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&FeatureInfo> {
        self.entries
            .get(id)
            .ok_or_else(|| PangenomeError::UnknownSyntheticId(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Proteins extracted from one genome, in feature order
#[derive(Debug, Clone)]
pub struct ExtractedGenome {
    /// FASTA records carry the local feature index as their id
    pub proteins: Vec<(SyntheticId, Sequence)>,
}

impl ExtractedGenome {
    pub fn synthetic_ids(&self) -> impl Iterator<Item = &SyntheticId> {
        self.proteins.iter().map(|(id, _)| id)
    }

    /// Write the per-genome FASTA consumed by the header normalization stage
    pub fn write_fasta(&self, path: &Path) -> Result<()> {
        let records: Vec<Sequence> = self.proteins.iter().map(|(_, seq)| seq.clone()).collect();
        write_fasta(path, &records)
    }
}

/// Extract participating proteins of `genome` and register them in `table`
pub fn extract_genome(
    genome_index: usize,
    genome_ref: &str,
    genome: &Genome,
    table: &mut FeatureTable,
) -> Result<ExtractedGenome> {
    let mut proteins = Vec::new();
    let mut feature_index = 0;

    for (position, feature) in genome.features.iter().enumerate() {
        if !feature.is_coding() {
            continue;
        }
        let Some(translation) = feature.translation() else {
            continue;
        };
        feature_index += 1;

        let id = SyntheticId::encode(genome_index, feature_index)?;
        table.insert(
            id.clone(),
            FeatureInfo {
                feature_id: feature.id.clone(),
                feature_position: position,
                genome_ref: genome_ref.to_string(),
                function: feature.function_or_empty().to_string(),
            },
        )?;

        let record = Sequence::new(
            id.local_part().to_string(),
            translation.as_bytes().to_vec(),
        );
        proteins.push((id, record));
    }

    tracing::debug!(
        "Genome {} ({}): {} of {} features participate",
        genome_index,
        genome_ref,
        proteins.len(),
        genome.features.len()
    );

    Ok(ExtractedGenome { proteins })
}
