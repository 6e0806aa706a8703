use crate::bio::sequence::Sequence;
use crate::PangenomeError;
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{line_ending, multispace0, not_line_ending, space1},
    combinator::{map, opt, verify},
    multi::many0,
    sequence::{pair, preceded, terminated},
    IResult,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Residues per line when writing FASTA
const LINE_WIDTH: usize = 60;

/// `>id[ description]`, consuming the line break
fn header(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, _) = tag(">")(input)?;
    let (input, id) = is_not(" \t\r\n")(input)?;
    let (input, description) = opt(preceded(space1, is_not("\r\n")))(input)?;
    let (input, _) = opt(line_ending)(input)?;
    Ok((input, (id, description)))
}

fn body_line(input: &str) -> IResult<&str, &str> {
    verify(not_line_ending, |line: &str| !line.starts_with('>'))(input)
}

/// A residue line; the last one may lack a line break
fn residue_line(input: &str) -> IResult<&str, &str> {
    alt((
        terminated(body_line, line_ending),
        verify(body_line, |line: &str| !line.is_empty()),
    ))(input)
}

fn record(input: &str) -> IResult<&str, Sequence> {
    map(pair(header, many0(residue_line)), |((id, description), lines)| {
        let residues = lines
            .iter()
            .flat_map(|line| line.bytes())
            .filter(|b| !b.is_ascii_whitespace())
            .map(|b| b.to_ascii_uppercase())
            .collect();
        let sequence = Sequence::new(id.to_string(), residues);
        match description {
            Some(description) => sequence.with_description(description.to_string()),
            None => sequence,
        }
    })(input)
}

/// Parse FASTA from bytes
pub fn parse_fasta_from_bytes(data: &[u8]) -> Result<Vec<Sequence>, PangenomeError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| PangenomeError::Parse(format!("FASTA is not valid UTF-8: {}", e)))?;

    let (rest, sequences) = preceded(multispace0, many0(record))(text)
        .map_err(|e| PangenomeError::Parse(format!("Failed to parse FASTA: {}", e)))?;

    if !rest.trim().is_empty() {
        return Err(PangenomeError::Parse(
            "FASTA record does not start with '>'".to_string(),
        ));
    }
    Ok(sequences)
}

/// Parse a FASTA file into sequences
pub fn parse_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>, PangenomeError> {
    let data = std::fs::read(path.as_ref())?;
    parse_fasta_from_bytes(&data)
}

/// Write sequences to a FASTA file
pub fn write_fasta<P: AsRef<Path>>(path: P, sequences: &[Sequence]) -> Result<(), PangenomeError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_fasta_to_writer(&mut writer, sequences)?;
    writer.flush()?;
    Ok(())
}

/// Write sequences to any writer
pub fn write_fasta_to_writer<W: Write>(
    writer: &mut W,
    sequences: &[Sequence],
) -> Result<(), PangenomeError> {
    for seq in sequences {
        writeln!(writer, "{}", seq.header())?;

        for chunk in seq.sequence.chunks(LINE_WIDTH) {
            writeln!(writer, "{}", String::from_utf8_lossy(chunk))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_multiple_records() {
        let data = b">1 first protein\nMKV\nLLA\n>2\nmst\n";
        let sequences = parse_fasta_from_bytes(data).unwrap();

        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].id, "1");
        assert_eq!(sequences[0].description.as_deref(), Some("first protein"));
        assert_eq!(sequences[0].sequence, b"MKVLLA");
        assert_eq!(sequences[1].id, "2");
        assert_eq!(sequences[1].sequence, b"MST");
    }

    #[test]
    fn test_header_without_trailing_newline() {
        let sequences = parse_fasta_from_bytes(b">1|1").unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].id, "1|1");
        assert!(sequences[0].is_empty());
    }

    #[test]
    fn test_rejects_headerless_input() {
        assert!(parse_fasta_from_bytes(b"MKV\n").is_err());
    }

    #[test]
    fn test_blank_lines_between_records() {
        let sequences = parse_fasta_from_bytes(b"\n>1\nMKV\n\n>2\nMST\n\n").unwrap();
        let ids: Vec<&str> = sequences.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(sequences[0].sequence, b"MKV");
    }

    #[test]
    fn test_write_wraps_long_sequences() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("long.fasta");
        let residues = vec![b'A'; LINE_WIDTH + 5];
        write_fasta(&path, &[Sequence::new("1".to_string(), residues.clone())]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), LINE_WIDTH);

        let parsed = parse_fasta(&path).unwrap();
        assert_eq!(parsed[0].sequence, residues);
    }
}
