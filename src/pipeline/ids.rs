//! Synthetic identifiers handed to the external toolchain
//!
//! Every participating feature is addressed as `<genomeIndex>|<featureIndex>`,
//! both 1-based. The toolchain never sees original feature ids.

use crate::{PangenomeError, Result};
use std::borrow::Borrow;
use std::fmt;

pub const DELIMITER: char = '|';

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SyntheticId(String);

impl SyntheticId {
    /// Build the id for a 1-based genome index and 1-based feature index
    pub fn encode(genome_index: usize, feature_index: usize) -> Result<Self> {
        if genome_index == 0 {
            return Err(PangenomeError::InvalidIndex(format!(
                "genome index must be positive (got {})",
                genome_index
            )));
        }
        if feature_index == 0 {
            return Err(PangenomeError::InvalidIndex(format!(
                "feature index must be positive (got {})",
                feature_index
            )));
        }
        Ok(Self(format!("{}{}{}", genome_index, DELIMITER, feature_index)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The portion after the delimiter, as written in per-genome FASTA headers
    pub fn local_part(&self) -> &str {
        self.0
            .split_once(DELIMITER)
            .map(|(_, local)| local)
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for SyntheticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SyntheticId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SyntheticId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1, "1|1")]
    #[case(3, 42, "3|42")]
    #[case(10, 1000, "10|1000")]
    fn test_encode(#[case] genome: usize, #[case] feature: usize, #[case] expected: &str) {
        let id = SyntheticId::encode(genome, feature).unwrap();
        assert_eq!(id.as_str(), expected);
        assert_eq!(id.to_string(), expected);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 0)]
    #[case(0, 0)]
    fn test_encode_rejects_non_positive(#[case] genome: usize, #[case] feature: usize) {
        let err = SyntheticId::encode(genome, feature).unwrap_err();
        assert!(matches!(err, PangenomeError::InvalidIndex(_)));
    }

    #[test]
    fn test_local_part() {
        let id = SyntheticId::encode(2, 17).unwrap();
        assert_eq!(id.local_part(), "17");
    }
}
