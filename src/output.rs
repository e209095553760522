// src/output.rs
// OUTPUT
// Formats hits as tab-delimited lines and writes them to any `Write` sink,
// buffered so a long run doesn't pay a syscall per hit.

use std::io::{self, Write};

use crate::hit::Hit;

/// Writes hits as `{label}\t{start}..{end}\t{sts_id}\t({strand})[\t{annotation}]`,
/// one per line, flushing once at the end of the run.
pub struct HitWriter<W: Write> {
    sink: W,
}

impl<W: Write> HitWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn write_hit(&mut self, hit: &Hit) -> io::Result<()> {
        if hit.sts.annotation.is_empty() {
            writeln!(
                self.sink,
                "{}\t{}..{}\t{}\t({})",
                hit.target_label,
                hit.start,
                hit.end,
                hit.sts.id,
                hit.strand.as_char()
            )
        } else {
            writeln!(
                self.sink,
                "{}\t{}..{}\t{}\t({})\t{}",
                hit.target_label,
                hit.start,
                hit.end,
                hit.sts.id,
                hit.strand.as_char(),
                hit.sts.annotation
            )
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::Strand;
    use crate::sts::Sts;

    fn sts(annotation: &str) -> Sts {
        Sts {
            id: "S1".to_string(),
            primer1: b"ACGT".to_vec(),
            primer2: b"TTTT".to_vec(),
            pcr_size: 100,
            annotation: annotation.to_string(),
        }
    }

    #[test]
    fn formats_hit_without_annotation() {
        let s = sts("");
        let hit = Hit {
            target_label: "t".to_string(),
            start: 10,
            end: 30,
            sts: &s,
            strand: Strand::Plus,
        };
        let mut buf = Vec::new();
        let mut w = HitWriter::new(&mut buf);
        w.write_hit(&hit).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "t\t10..30\tS1\t(+)\n");
    }

    #[test]
    fn formats_hit_with_annotation() {
        let s = sts("some gene");
        let hit = Hit {
            target_label: "t".to_string(),
            start: 10,
            end: 30,
            sts: &s,
            strand: Strand::Minus,
        };
        let mut buf = Vec::new();
        let mut w = HitWriter::new(&mut buf);
        w.write_hit(&hit).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "t\t10..30\tS1\t(-)\tsome gene\n");
    }
}
