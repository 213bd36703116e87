//! Delimited table file reading.
//!
//! Records are decoded with `csv`, with two adjustments so that every line of
//! a table file is accounted for:
//!
//! - `\r\n` and lone `\r` line endings read as `\n`, and a final line
//!   terminator is implied when the file lacks one.
//! - A blank line is a record with no fields. The decoder skips blank lines
//!   silently, so they are recovered from the line count: a record that
//!   consumed more lines than it spans was preceded by that many blank lines.

use csv::{Position, ReaderBuilder, StringRecord};
use reclab_types::{DatasetManifest, MaterializedTable, ReclabError, Result, Row};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};

/// Normalizes line endings to `\n` and terminates the final line.
#[derive(Debug)]
pub(crate) struct LineEndings<R> {
    inner: R,
    after_cr: bool,
    last: Option<u8>,
    finished: bool,
}

impl<R: BufRead> LineEndings<R> {
    pub(crate) const fn new(inner: R) -> Self {
        Self {
            inner,
            after_cr: false,
            last: None,
            finished: false,
        }
    }
}

impl<R: BufRead> Read for LineEndings<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() || self.finished {
            return Ok(0);
        }

        let mut written = 0;
        while written == 0 {
            let input = self.inner.fill_buf()?;
            if input.is_empty() {
                self.finished = true;
                if self.last.is_some_and(|b| b != b'\n') {
                    out[0] = b'\n';
                    self.last = Some(b'\n');
                    return Ok(1);
                }
                return Ok(0);
            }

            let mut consumed = 0;
            for &byte in input {
                if written == out.len() {
                    break;
                }
                consumed += 1;
                match byte {
                    b'\r' => {
                        out[written] = b'\n';
                        written += 1;
                        self.after_cr = true;
                    }
                    // Second half of a CRLF pair.
                    b'\n' if self.after_cr => self.after_cr = false,
                    _ => {
                        out[written] = byte;
                        written += 1;
                        self.after_cr = false;
                    }
                }
            }
            self.inner.consume(consumed);
        }

        self.last = Some(out[written - 1]);
        Ok(written)
    }
}

/// Rows of one open table file, header included, blank lines as empty rows.
pub(crate) struct Records {
    reader: csv::Reader<LineEndings<BufReader<File>>>,
    record: StringRecord,
    pending: VecDeque<Row>,
    done: bool,
}

impl Iterator for Records {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(row) = self.pending.pop_front() {
            return Some(Ok(row));
        }
        if self.done {
            return None;
        }

        let before = self.reader.position().line();
        let read = self.reader.read_record(&mut self.record);
        let consumed = self.reader.position().line().saturating_sub(before);

        match read {
            Ok(true) => {
                let spanned = 1 + embedded_newlines(&self.record);
                self.pending
                    .extend((spanned..consumed).map(|_| Row::new()));
                self.pending.push_back(to_row(&self.record));
            }
            Ok(false) => {
                self.done = true;
                self.pending.extend((0..consumed).map(|_| Row::new()));
            }
            Err(e) => {
                self.done = true;
                return Some(Err(decode_error(e, before)));
            }
        }
        self.pending.pop_front().map(Ok)
    }
}

/// Opens a declared table and returns its records, header included.
pub(crate) fn open_records(manifest: &DatasetManifest, table: &str) -> Result<Records> {
    let file = File::open(manifest.table_path(table))?;
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(manifest.delimiter())
        .flexible(true)
        .from_reader(LineEndings::new(BufReader::new(file)));
    Ok(Records {
        reader,
        record: StringRecord::new(),
        pending: VecDeque::new(),
        done: false,
    })
}

/// Reads only the first record of a table.
pub(crate) fn read_header(manifest: &DatasetManifest, table: &str) -> Result<Option<Row>> {
    open_records(manifest, table)?.next().transpose()
}

/// Reads a whole table: the first record as header, the rest as body.
pub(crate) fn read_table(manifest: &DatasetManifest, table: &str) -> Result<MaterializedTable> {
    let mut records = open_records(manifest, table)?;
    let header = records.next().transpose()?;
    let rows = records.collect::<Result<Vec<_>>>()?;
    Ok(MaterializedTable::new(header, rows))
}

fn to_row(record: &StringRecord) -> Row {
    record.iter().map(str::to_string).collect()
}

fn embedded_newlines(record: &StringRecord) -> u64 {
    record
        .iter()
        .map(|field| field.bytes().filter(|&b| b == b'\n').count() as u64)
        .sum()
}

/// Maps a decoder error, locating it at `fallback_line` when the error
/// carries no position of its own.
fn decode_error(err: csv::Error, fallback_line: u64) -> ReclabError {
    let line = err.position().map_or(fallback_line, Position::line);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => ReclabError::Io(e),
        _ => ReclabError::Csv { line, message },
    }
}
