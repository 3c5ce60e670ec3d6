use crate::BoxError;
use crate::cursor::RawCursorRecord;
use std::collections::VecDeque;
use std::io::BufRead;

/// A stream of cursor records for one translation unit, in traversal order.
///
/// This is the seam to the external parser: records are pulled one at a time
/// and each is fully indexed before the next is requested.
pub trait CursorSource: Send {
    /// Name of the translation unit, for logs and error messages.
    fn unit_name(&self) -> &str;

    /// The next record, `None` once the traversal is exhausted.
    fn next_cursor(&mut self) -> Option<Result<RawCursorRecord, BoxError>>;
}

/// A translation unit whose records are already in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordedUnit {
    name: String,
    records: VecDeque<RawCursorRecord>,
}

impl RecordedUnit {
    pub fn new(name: impl Into<String>, records: Vec<RawCursorRecord>) -> Self {
        Self {
            name: name.into(),
            records: records.into(),
        }
    }

    pub fn push(&mut self, record: RawCursorRecord) {
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CursorSource for RecordedUnit {
    fn unit_name(&self) -> &str {
        &self.name
    }

    fn next_cursor(&mut self) -> Option<Result<RawCursorRecord, BoxError>> {
        self.records.pop_front().map(Ok)
    }
}

/// Records handed over by an out-of-process parser, one JSON object per line.
/// Blank lines are skipped.
pub struct JsonLinesSource<R> {
    name: String,
    reader: R,
    line: String,
    line_no: usize,
}

impl<R: BufRead + Send> JsonLinesSource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            line: String::new(),
            line_no: 0,
        }
    }
}

impl<R: BufRead + Send> CursorSource for JsonLinesSource<R> {
    fn unit_name(&self) -> &str {
        &self.name
    }

    fn next_cursor(&mut self) -> Option<Result<RawCursorRecord, BoxError>> {
        loop {
            self.line.clear();
            self.line_no += 1;
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) if self.line.trim().is_empty() => continue,
                Ok(_) => {
                    return Some(serde_json::from_str(self.line.trim_end()).map_err(|e| {
                        format!("{}:{}: {}", self.name, self.line_no, e).into()
                    }));
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
