/// FASTA handling for the files that flow between pipeline stages
///
/// Per-genome files carry bare local indices; the curated protein set carries
/// `genome|feature` ids after header normalization.
use pangenome_orthomcl::bio::fasta::{parse_fasta, parse_fasta_from_bytes, write_fasta};
use pangenome_orthomcl::bio::sequence::Sequence;
use tempfile::TempDir;

#[test]
fn test_compliant_headers_keep_the_delimiter() {
    let fasta = b">1|1\nMKV\n>1|2 hypothetical\nMSTA\n>2|1\nMKV\n";

    let sequences = parse_fasta_from_bytes(fasta).unwrap();
    let ids: Vec<&str> = sequences.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1|1", "1|2", "2|1"]);
    assert_eq!(sequences[1].description.as_deref(), Some("hypothetical"));
}

#[test]
fn test_long_translations_are_wrapped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("1.fasta");
    let residues = "M".repeat(150);
    write_fasta(&path, &[Sequence::new("1".to_string(), residues.as_bytes().to_vec())]).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], ">1");
    assert!(lines[1..].iter().all(|line| line.len() <= 60));

    let records = parse_fasta(&path).unwrap();
    assert_eq!(records[0].sequence, residues.as_bytes());
}

#[test]
fn test_windows_line_endings() {
    let fasta = b">1\r\nMKV\r\nLLA\r\n>2\r\nMST\r\n";
    let sequences = parse_fasta_from_bytes(fasta).unwrap();
    assert_eq!(sequences.len(), 2);
    assert_eq!(sequences[0].sequence, b"MKVLLA");
    assert_eq!(sequences[1].sequence, b"MST");
}

#[test]
fn test_empty_curated_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("goodProteins.fasta");
    std::fs::write(&path, "").unwrap();

    assert!(parse_fasta(&path).unwrap().is_empty());
}

#[test]
fn test_text_before_first_header_is_rejected() {
    assert!(parse_fasta_from_bytes(b"MKV\n>1\nMKV\n").is_err());
}
