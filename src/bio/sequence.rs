use serde::{Deserialize, Serialize};

/// A protein sequence record as written to or read from FASTA
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    pub description: Option<String>,
    pub sequence: Vec<u8>,
}

impl Sequence {
    pub fn new(id: String, sequence: Vec<u8>) -> Self {
        Self {
            id,
            description: None,
            sequence,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn header(&self) -> String {
        match &self.description {
            Some(desc) if !desc.is_empty() => format!(">{} {}", self.id, desc),
            _ => format!(">{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_without_description() {
        let seq = Sequence::new("7".to_string(), b"MKV".to_vec());
        assert_eq!(seq.header(), ">7");
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_header_with_description() {
        let seq = Sequence::new("1|3".to_string(), b"MKV".to_vec())
            .with_description("kinase".to_string());
        assert_eq!(seq.header(), ">1|3 kinase");
    }
}
