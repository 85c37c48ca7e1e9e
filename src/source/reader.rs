//! Reader-based snapshot source.
//!
//! Reads newline-delimited snapshots from any buffered reader, which lets
//! the binary accept `-` for standard input.

use std::io::BufRead;
use std::path::PathBuf;

use super::snapshot::parse_record;
use super::{Snapshot, SnapshotSource};
use crate::error::{PipelineError, Result};

/// A source that drains a [`BufRead`] to EOF.
///
/// The reader is consumed on the first successful [`load`](SnapshotSource::load);
/// later calls return an empty sequence.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    description: String,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R, description: &str) -> Self {
        Self {
            reader,
            description: format!("stream: {}", description),
        }
    }
}

impl<R: BufRead + std::fmt::Debug> SnapshotSource for ReaderSource<R> {
    fn load(&mut self) -> Result<Vec<Snapshot>> {
        let mut snapshots = Vec::new();
        let mut line = String::new();
        let mut line_number = 0;

        loop {
            line.clear();
            let read = self.reader.read_line(&mut line).map_err(|source| {
                PipelineError::FileAccess {
                    path: PathBuf::from(&self.description),
                    source,
                }
            })?;
            if read == 0 {
                break;
            }
            line_number += 1;
            let record = line.strip_suffix('\n').unwrap_or(&line);
            let record = record.strip_suffix('\r').unwrap_or(record);
            snapshots.push(parse_record(line_number, record)?);
        }

        Ok(snapshots)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_source_multiple_snapshots() {
        let data = "{\"hyper.add\":{\"count\":1}}\n{\"hyper.add\":{\"count\":4}}\n";
        let mut source = ReaderSource::new(Cursor::new(data), "test");

        let snapshots = source.load().unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1].resolve("hyper.add", "count").unwrap(), 4.0);

        // Reader is drained
        assert!(source.load().unwrap().is_empty());
    }

    #[test]
    fn test_reader_source_without_trailing_newline() {
        let data = "{\"m\":{\"value\":1}}\r\n{\"m\":{\"value\":2}}";
        let mut source = ReaderSource::new(Cursor::new(data), "test");
        assert_eq!(source.load().unwrap().len(), 2);
    }

    #[test]
    fn test_reader_source_description() {
        let source = ReaderSource::new(Cursor::new(""), "stdin");
        assert_eq!(source.description(), "stream: stdin");
    }

    #[test]
    fn test_reader_source_invalid_json() {
        let data = "{\"m\":{\"value\":1}}\nnot valid json\n";
        let mut source = ReaderSource::new(Cursor::new(data), "test");
        assert!(matches!(
            source.load(),
            Err(PipelineError::RecordParse { line: 2, .. })
        ));
    }
}
