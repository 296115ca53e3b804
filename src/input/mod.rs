pub mod census;
pub mod simd;

use std::path::{Path, PathBuf};
use std::{fmt, io};

use csv::{ByteRecord, Reader, ReaderBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("row at line {line} has no value for column {column}")]
    MissingField { line: u64, column: String },
    #[error("invalid number at line {line} in column {column}: {value:?}")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },
    #[error("unrecognised age band at line {line}: {label:?}")]
    InvalidAgeBand { line: u64, label: String },
    #[error("population total overflows for region {0}")]
    Overflow(String),
    #[error("unsupported gzip input without feature enabled: {0}")]
    GzipNotEnabled(PathBuf),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub fn open_reader(path: &Path) -> Result<Box<dyn io::BufRead>, InputError> {
    let file = std::fs::File::open(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        #[cfg(feature = "gz")]
        {
            let decoder = flate2::read::GzDecoder::new(file);
            return Ok(Box::new(io::BufReader::new(decoder)));
        }
        #[cfg(not(feature = "gz"))]
        {
            return Err(InputError::GzipNotEnabled(path.to_path_buf()));
        }
    }
    Ok(Box::new(io::BufReader::new(file)))
}

/// Discards up to `n` raw lines. Returns false if the input ended first.
pub fn skip_lines<R: io::BufRead + ?Sized>(reader: &mut R, n: usize) -> Result<bool, InputError> {
    for _ in 0..n {
        if !skip_line(reader)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Consumes one line ended by `\n`, `\r` or `\r\n`. False at end of input.
fn skip_line<R: io::BufRead + ?Sized>(reader: &mut R) -> Result<bool, InputError> {
    let mut read_any = false;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(read_any);
        }
        read_any = true;
        let len = buf.len();
        let end = buf
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .map(|i| (i, buf[i] == b'\r'));
        match end {
            Some((i, is_cr)) => {
                reader.consume(i + 1);
                if is_cr && reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                return Ok(true);
            }
            None => reader.consume(len),
        }
    }
}

/// ISO-8859-1 maps each byte to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

pub fn csv_reader<R: io::Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

/// Index of the column called `name`; the last one wins when a name repeats.
pub fn column_index(headers: &ByteRecord, name: &str) -> Result<usize, InputError> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| decode_latin1(h) == name)
        .map(|(idx, _)| idx)
        .last()
        .ok_or_else(|| InputError::MissingColumn(name.to_string()))
}

/// Field `idx` of `record`, decoded as Latin-1.
pub(crate) fn field(
    record: &ByteRecord,
    idx: usize,
    column: &str,
    line: u64,
) -> Result<String, InputError> {
    record
        .get(idx)
        .map(decode_latin1)
        .ok_or_else(|| InputError::MissingField {
            line,
            column: column.to_string(),
        })
}

pub(crate) fn parse_number<T: std::str::FromStr>(
    value: &str,
    column: &str,
    line: u64,
) -> Result<T, InputError> {
    value.trim().parse().map_err(|_| InputError::InvalidNumber {
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// 1-based file line of `record`, shifted by lines consumed before the csv reader.
pub(crate) fn record_line(record: &ByteRecord, offset: usize) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0) + offset as u64
}

pub fn path_display(path: &Path) -> impl fmt::Display + '_ {
    path.to_string_lossy()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/mod.rs"]
mod tests;
