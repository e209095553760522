// src/fasta.rs
// FASTA LOADER
// A streaming, one-record-at-a-time FASTA reader: each call to `next`
// returns a single target once its header and sequence lines have been
// fully consumed, rather than buffering a batch the way the teacher's
// `DnaBatchIterator` does -- the scanner works one target at a time, so
// there is no batching benefit here, only the cost of holding N targets in
// memory at once.

use std::io::{self, BufRead};
use std::mem;

/// One FASTA record: a label (the first whitespace-delimited token after
/// `>`) and its payload, with embedded whitespace and digits stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub label: String,
    pub payload: Vec<u8>,
}

pub struct FastaReader<R> {
    lines: io::Lines<R>,
    pending_label: Option<String>,
    pending_payload: Vec<u8>,
    exhausted: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending_label: None,
            pending_payload: Vec::new(),
            exhausted: false,
        }
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = io::Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(raw_line)) => {
                    let line = raw_line.trim_end();
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(header) = line.strip_prefix('>') {
                        let label = parse_label(header);
                        if let Some(prev_label) = self.pending_label.replace(label) {
                            let prev_payload = mem::take(&mut self.pending_payload);
                            return Some(Ok(FastaRecord {
                                label: prev_label,
                                payload: prev_payload,
                            }));
                        }
                    } else {
                        append_payload(&mut self.pending_payload, line);
                    }
                }
                Some(Err(e)) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
                None => {
                    self.exhausted = true;
                    return self.pending_label.take().map(|label| {
                        Ok(FastaRecord {
                            label,
                            payload: mem::take(&mut self.pending_payload),
                        })
                    });
                }
            }
        }
    }
}

fn parse_label(header: &str) -> String {
    header
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_string()
}

fn append_payload(payload: &mut Vec<u8>, line: &str) {
    payload.extend(
        line.bytes()
            .filter(|b| !b.is_ascii_whitespace() && !b.is_ascii_digit()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_single_record() {
        let text = ">seq1 some description\nACGT\nACGT\n";
        let mut reader = FastaReader::new(Cursor::new(text));
        let rec = reader.next().unwrap().unwrap();
        assert_eq!(rec.label, "seq1");
        assert_eq!(rec.payload, b"ACGTACGT");
        assert!(reader.next().is_none());
    }

    #[test]
    fn parses_multiple_records() {
        let text = ">a\nACGT\n>b\nTTTT\n";
        let mut reader = FastaReader::new(Cursor::new(text));
        let a = reader.next().unwrap().unwrap();
        let b = reader.next().unwrap().unwrap();
        assert_eq!((a.label.as_str(), a.payload.as_slice()), ("a", b"ACGT".as_slice()));
        assert_eq!((b.label.as_str(), b.payload.as_slice()), ("b", b"TTTT".as_slice()));
    }

    #[test]
    fn strips_embedded_whitespace_and_digits() {
        let text = ">a\n  ACGT 1234\nACGT\n";
        let mut reader = FastaReader::new(Cursor::new(text));
        let rec = reader.next().unwrap().unwrap();
        assert_eq!(rec.payload, b"ACGTACGT");
    }

    #[test]
    fn header_with_no_sequence_yields_empty_payload() {
        let text = ">a\n>b\nACGT\n";
        let mut reader = FastaReader::new(Cursor::new(text));
        let a = reader.next().unwrap().unwrap();
        assert_eq!(a.label, "a");
        assert!(a.payload.is_empty());
        let b = reader.next().unwrap().unwrap();
        assert_eq!(b.label, "b");
    }

    #[test]
    fn label_stops_at_first_whitespace() {
        let text = ">gi|123|ref|NC_000001 Homo sapiens chromosome 1\nACGT\n";
        let mut reader = FastaReader::new(Cursor::new(text));
        let rec = reader.next().unwrap().unwrap();
        assert_eq!(rec.label, "gi|123|ref|NC_000001");
    }
}
