//! Memory access trace decoding
//!
//! Each relevant line has the form `<R|W>: <hex address>`. Lines without a
//! colon are skipped.

use crate::error::{Error, Result};
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

impl AccessKind {
    pub fn is_write(self) -> bool {
        self == AccessKind::Write
    }
}

/// One decoded access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// 1-based line number in the input
    pub line: usize,
    pub kind: AccessKind,
    pub address: u64,
}

/// Decode a single line. `Ok(None)` for lines that carry no access.
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<TraceRecord>> {
    let Some((kind, address)) = line.split_once(':') else {
        return Ok(None);
    };

    let kind = match kind.trim_start().chars().next() {
        Some('W') | Some('w') => AccessKind::Write,
        Some(_) => AccessKind::Read,
        None => {
            return Err(Error::MalformedTrace {
                line: line_number,
                reason: "missing access kind".to_string(),
            })
        }
    };

    let digits = address.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    let address = u64::from_str_radix(digits, 16).map_err(|e| Error::MalformedTrace {
        line: line_number,
        reason: format!("invalid address {:?}: {}", address.trim(), e),
    })?;

    Ok(Some(TraceRecord {
        line: line_number,
        kind,
        address,
    }))
}

/// Streaming reader over a trace, tracking consumed bytes for progress reporting
pub struct TraceReader<R> {
    reader: R,
    buf: String,
    line: usize,
    bytes_read: u64,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
            bytes_read: 0,
        }
    }

    /// Bytes consumed from the underlying input so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Number of lines consumed so far
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            let n = match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(n) => n,
                Err(e) => return Some(Err(e.into())),
            };
            self.bytes_read += n as u64;
            self.line += 1;

            match parse_line(self.line, &self.buf) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_read_and_write() {
        let record = parse_line(1, "R: 0x0041f7a0\n").unwrap().unwrap();
        assert_eq!(record.kind, AccessKind::Read);
        assert_eq!(record.address, 0x0041_f7a0);

        let record = parse_line(2, "W: 13f5e2c0").unwrap().unwrap();
        assert!(record.kind.is_write());
        assert_eq!(record.address, 0x13f5_e2c0);
    }

    #[test]
    fn test_unknown_kind_is_read() {
        let record = parse_line(1, "I: ff").unwrap().unwrap();
        assert_eq!(record.kind, AccessKind::Read);
    }

    #[test]
    fn test_lines_without_colon_are_skipped() {
        assert_eq!(parse_line(1, "\n").unwrap(), None);
        assert_eq!(parse_line(1, "# header").unwrap(), None);
    }

    #[test]
    fn test_malformed_address() {
        let err = parse_line(7, "R: zz").unwrap_err();
        assert!(matches!(err, Error::MalformedTrace { line: 7, .. }));
        assert!(parse_line(3, ": 10").is_err());
    }

    #[test]
    fn test_reader_tracks_lines_and_bytes() {
        let input = "R: 10\n\nW: 20\n";
        let mut reader = TraceReader::new(Cursor::new(input));

        let first = reader.next().unwrap().unwrap();
        assert_eq!((first.line, first.address), (1, 0x10));

        let second = reader.next().unwrap().unwrap();
        assert_eq!((second.line, second.kind), (3, AccessKind::Write));

        assert!(reader.next().is_none());
        assert_eq!(reader.bytes_read(), input.len() as u64);
        assert_eq!(reader.line(), 3);
    }
}
