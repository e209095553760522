// src/sts.rs
// STS LIBRARY
// Parses the tab-delimited STS definition file into a frozen library of
// `Sts` records. This is the "thin collaborator" described in the spec: a
// line scanner plus per-record validation, not part of the core search
// algorithm.

use std::io::BufRead;

use tracing::warn;

/// One Sequence-Tagged Site: a pair of primers and an expected amplicon size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sts {
    pub id: String,
    pub primer1: Vec<u8>,
    pub primer2: Vec<u8>,
    pub pcr_size: u32,
    pub annotation: String,
}

impl Sts {
    /// Shorter of the two primer lengths; an STS is indexable only for word
    /// sizes not exceeding this.
    pub fn min_primer_len(&self) -> usize {
        self.primer1.len().min(self.primer2.len())
    }
}

/// A frozen collection of STS records, in file order.
#[derive(Debug, Default)]
pub struct StsLibrary {
    records: Vec<Sts>,
}

impl StsLibrary {
    pub fn records(&self) -> &[Sts] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parses `<id>\t<primer1>\t<primer2>\t<size>[\t<annotation>]` records.
/// `#`-prefixed and blank lines are ignored. `<size>` is either a plain
/// integer or a range `a-b`, in which case the (floor) midpoint is used.
///
/// Malformed lines are logged and skipped rather than aborting the parse;
/// the caller decides whether an empty result is fatal (see the
/// Configuration error kind in §7 of the spec).
pub fn parse_sts_library<R: BufRead>(
    reader: R,
    word_size: usize,
    default_pcr_size: u32,
) -> std::io::Result<StsLibrary> {
    let mut records = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_sts_line(line, default_pcr_size) {
            Some(sts) => {
                if sts.min_primer_len() < word_size {
                    warn!(
                        line = lineno + 1,
                        id = %sts.id,
                        min_primer_len = sts.min_primer_len(),
                        word_size,
                        "skipping STS: primer shorter than word size"
                    );
                    continue;
                }
                records.push(sts);
            }
            None => {
                warn!(line = lineno + 1, "skipping malformed STS record");
            }
        }
    }

    Ok(StsLibrary { records })
}

fn parse_sts_line(line: &str, default_pcr_size: u32) -> Option<Sts> {
    let mut fields = line.split('\t');
    let id = fields.next()?.trim().to_string();
    let primer1 = fields.next()?.trim();
    let primer2 = fields.next()?.trim();
    let size_field = fields.next().map(str::trim).unwrap_or("");
    let annotation = fields.next().unwrap_or("").to_string();

    if id.is_empty() || primer1.is_empty() || primer2.is_empty() {
        return None;
    }
    if !primer1.bytes().all(is_primer_byte) || !primer2.bytes().all(is_primer_byte) {
        return None;
    }

    let pcr_size = if size_field.is_empty() {
        default_pcr_size
    } else {
        parse_size(size_field)?
    };

    Some(Sts {
        id,
        primer1: primer1.as_bytes().to_ascii_uppercase(),
        primer2: primer2.as_bytes().to_ascii_uppercase(),
        pcr_size,
        annotation,
    })
}

fn is_primer_byte(b: u8) -> bool {
    matches!(
        b.to_ascii_uppercase(),
        b'A' | b'C' | b'G' | b'T' | b'R' | b'Y' | b'S' | b'W' | b'K' | b'M' | b'B' | b'D' | b'H'
            | b'V' | b'N'
    )
}

fn parse_size(field: &str) -> Option<u32> {
    if let Some((a, b)) = field.split_once('-') {
        let a: u32 = a.trim().parse().ok()?;
        let b: u32 = b.trim().parse().ok()?;
        if a == 0 || b == 0 {
            return None;
        }
        Some((a + b) / 2)
    } else {
        let size: u32 = field.parse().ok()?;
        if size == 0 {
            None
        } else {
            Some(size)
        }
    }
}
