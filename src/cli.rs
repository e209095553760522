// src/cli.rs
use clap::Parser;

#[derive(Parser)]
#[command(name = "epcr", author, version, about, long_about = None)]
#[command(help_template = "\
{before-help}{name} v{version}
{author-with-newline}{about-with-newline}
{usage-heading}
{usage}

{all-args}{after-help}
")]
pub struct Cli {
    /// STS marker library (tab-delimited: id, primer1, primer2, size[, annotation]).
    #[arg(long, value_name = "FILE")]
    pub sts: String,

    /// FASTA files to search, processed in the given order.
    #[arg(value_name = "FASTA", required = true)]
    pub targets: Vec<String>,

    /// Output file for formatted hits. Omit, or pass `-`, for stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Set the number of worker threads for parallel scanning.
    ///
    /// - 0: Auto-detect (use all available cores).
    /// - 1: Sequential (single-threaded, good for debugging).
    /// - >1: Force a specific thread count.
    #[arg(short = 'j', long, default_value_t = 0, value_name = "THREADS")]
    pub threads: usize,

    /// Quiet mode: only warnings and errors are logged.
    #[arg(short, long)]
    pub quiet: bool,

    /// k-mer width used to seed the hash index.
    #[arg(short = 'W', long = "word-size", default_value_t = 11, value_name = "W")]
    pub word_size: usize,

    /// Tolerance (+/-) around an STS's declared amplicon size.
    #[arg(short = 'M', long = "margin", default_value_t = 50, value_name = "M")]
    pub margin: u32,

    /// Per-primer mismatch budget outside the protected 3' region.
    #[arg(short = 'N', long = "mismatches", default_value_t = 0, value_name = "N")]
    pub mismatches: usize,

    /// Exact-match length required at each primer's 3' end.
    #[arg(short = 'X', long = "protection", default_value_t = 1, value_name = "X")]
    pub protection: usize,

    /// Amplicon size assumed for STS records that omit one.
    #[arg(long = "default-pcr-size", default_value_t = 240, value_name = "BP")]
    pub default_pcr_size: u32,

    /// Enables IUPAC-ambiguity-aware primer comparison.
    #[arg(long)]
    pub iupac: bool,
}
