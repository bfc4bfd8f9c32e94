use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::types::{ExtractOutcome, LeafletRecord};

const PARSED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local wall-clock timestamp stamped on every record of one run.
pub fn current_parsed_time() -> String {
    Local::now().format(PARSED_TIME_FORMAT).to_string()
}

/// Writes `value` as JSON with 4-space indentation. Non-ASCII characters are
/// left unescaped.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> serde_json::Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)
}

pub fn to_json_string(records: &[LeafletRecord]) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, records)?;
    String::from_utf8(buf)
        .map_err(|e| serde_json::Error::io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Creates or truncates `path` and writes the records into it.
pub fn write_leaflets_json(path: &Path, records: &[LeafletRecord]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, records)?;
    writer.flush()
}

#[derive(Debug)]
pub struct RunSummary {
    pub extracted: usize,
    pub skipped: usize,
    pub shops: usize,
    pub output: PathBuf,
}

impl RunSummary {
    pub fn from_outcome(outcome: &ExtractOutcome, output: &Path) -> RunSummary {
        let shops: BTreeSet<&str> = outcome
            .records
            .iter()
            .map(|r| r.shop_name.as_str())
            .collect();

        RunSummary {
            extracted: outcome.records.len(),
            skipped: outcome.skipped.len(),
            shops: shops.len(),
            output: output.to_path_buf(),
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Leaflets extracted: {}", self.extracted)?;
        writeln!(f, "  Leaflets skipped:   {}", self.skipped)?;
        writeln!(f, "  Distinct shops:     {}", self.shops)?;
        writeln!(f, "  Output:             {}", self.output.display())
    }
}
