//! Projection of the group listing back onto source features

use crate::pipeline::extractor::FeatureTable;
use crate::types::pangenome::{OrthologGroup, OrthologMember};
use crate::Result;
use std::path::Path;

/// Prefix of the cluster ids assigned by projection
pub const CLUSTER_PREFIX: &str = "cluster";

/// Longest non-empty annotation; ties keep the first seen
pub fn representative_function<'a, I>(functions: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best = "";
    for function in functions {
        if function.len() > best.len() {
            best = function;
        }
    }
    best.to_string()
}

/// Project one group-listing line.
///
/// The first token is the toolchain's own group label and is discarded; the
/// remaining tokens are synthetic ids, kept in the order they appear.
pub fn project_line(cluster_number: usize, line: &str, table: &FeatureTable) -> Result<OrthologGroup> {
    let mut members = Vec::new();
    let mut functions = Vec::new();

    for token in line.split_whitespace().skip(1) {
        let info = table.get(token)?;
        members.push(OrthologMember(
            info.feature_id.clone(),
            info.feature_position,
            info.genome_ref.clone(),
        ));
        functions.push(info.function.as_str());
    }

    Ok(OrthologGroup {
        function: representative_function(functions),
        id: format!("{}{}", CLUSTER_PREFIX, cluster_number),
        orthologs: members,
    })
}

/// Project a whole group listing, one group per line.
///
/// Line position `n` (0-based) becomes `cluster<n+1>`; a blank line yields an
/// empty group so later lines keep their numbers.
pub fn project_groups(listing: &str, table: &FeatureTable) -> Result<Vec<OrthologGroup>> {
    listing
        .lines()
        .enumerate()
        .map(|(position, line)| project_line(position + 1, line, table))
        .collect()
}

/// Read and project the group listing file
pub fn project_groups_file(path: &Path, table: &FeatureTable) -> Result<Vec<OrthologGroup>> {
    let listing = std::fs::read_to_string(path)?;
    let groups = project_groups(&listing, table)?;
    tracing::debug!("Projected {} groups from {:?}", groups.len(), path);
    Ok(groups)
}
