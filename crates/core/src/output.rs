use crate::error::{Result, XrefError};
use crate::index::GlobalIndex;
use crate::model::Occurrence;
use crate::validate::Validator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;
use xrefscope_api::models::IndexRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One unquoted comma-separated record per line.
    #[default]
    Csv,
    /// One JSON object per line.
    JsonLines,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Csv => "csv",
            OutputFormat::JsonLines => "json_lines",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = XrefError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json_lines" | "jsonl" | "json" => Ok(OutputFormat::JsonLines),
            other => Err(XrefError::Config(format!("unknown output format: {other}"))),
        }
    }
}

pub struct RecordWriter<W: Write> {
    out: W,
    format: OutputFormat,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            written: 0,
        }
    }

    /// Emit every entity of `index` in index order. Returns the number of
    /// records written by this call.
    pub fn write_index(&mut self, index: &GlobalIndex) -> Result<usize> {
        let before = self.written;
        for occurrence in index.records() {
            self.write_occurrence(occurrence)?;
        }
        self.out.flush()?;
        Ok(self.written - before)
    }

    pub fn write_occurrence(&mut self, occurrence: &Occurrence) -> Result<()> {
        self.write_record(&occurrence.to_record())
    }

    pub fn write_record(&mut self, record: &IndexRecord) -> Result<()> {
        match self.format {
            OutputFormat::Csv => writeln!(self.out, "{record}")?,
            OutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.out, record)?;
                self.out.write_all(b"\n")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Read back a record stream written in `format`, checking every record
/// against `validator`. Blank lines are skipped.
pub fn read_records<R: BufRead>(
    reader: R,
    format: OutputFormat,
    validator: &Validator,
) -> Result<Vec<IndexRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = match format {
            OutputFormat::Csv => line.parse::<IndexRecord>()?,
            OutputFormat::JsonLines => serde_json::from_str(&line)?,
        };
        validator.check_record(&record)?;
        records.push(record);
    }
    Ok(records)
}
