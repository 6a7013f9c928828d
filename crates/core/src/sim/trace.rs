//! Address trace parsing.
//!
//! A trace holds one access per line: an operation tag (`r` or `w`, case
//! insensitive) followed by a hexadecimal address, with or without a `0x`
//! prefix. Blank lines are skipped. Anything else is a [`TraceError`] with
//! the offending line number.

use std::io::BufRead;

use crate::common::data::AccessKind;
use crate::common::error::TraceError;

/// One parsed trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// The 32-bit address accessed.
    pub addr: u32,
    /// Read or write.
    pub kind: AccessKind,
}

/// Streaming reader yielding [`TraceRecord`]s from any [`BufRead`] source.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    line: u64,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps `reader` as a trace source.
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut buf = String::new();
            match self.reader.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;
            if buf.trim().is_empty() {
                continue;
            }
            return Some(parse_record(&buf, self.line));
        }
    }
}

/// Parses one non-empty trace line.
fn parse_record(line_text: &str, line: u64) -> Result<TraceRecord, TraceError> {
    let mut parts = line_text.split_whitespace();
    let op = parts.next().unwrap_or_default();
    let kind = match op {
        "r" | "R" => AccessKind::Read,
        "w" | "W" => AccessKind::Write,
        _ => {
            return Err(TraceError::BadOperation {
                line,
                token: op.to_owned(),
            })
        }
    };
    let token = parts.next().ok_or_else(|| TraceError::BadAddress {
        line,
        token: String::new(),
    })?;
    let hex = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    let addr = u32::from_str_radix(hex, 16).map_err(|_| TraceError::BadAddress {
        line,
        token: token.to_owned(),
    })?;
    Ok(TraceRecord { addr, kind })
}
