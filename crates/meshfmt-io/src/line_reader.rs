//! Buffered line source with a bounded line length.
//!
//! Lines are read into a reusable buffer that grows as needed up to the
//! configured maximum. A line exceeding the maximum is reported as
//! [`MeshIoError::LineTooLong`] instead of being truncated or split.

use std::io::{BufRead, Read};

use meshfmt_core::status::{MeshIoError, StatusResult};

pub const DEFAULT_MAX_LINE_LENGTH: usize = 4096;

/// A line of text with its terminator removed.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    pub text: &'a str,
}

#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    bytes: Vec<u8>,
    text: String,
    max_line_length: usize,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_max_line_length(inner, DEFAULT_MAX_LINE_LENGTH)
    }

    pub fn with_max_line_length(inner: R, max_line_length: usize) -> Self {
        Self {
            inner,
            bytes: Vec::new(),
            text: String::new(),
            max_line_length,
            line_number: 0,
        }
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next line, returning `None` at end of input.
    ///
    /// Trailing `\n` and `\r` are stripped. Invalid UTF-8 is replaced rather
    /// than rejected.
    pub fn read_line(&mut self) -> StatusResult<Option<Line<'_>>> {
        self.bytes.clear();
        // Room for the longest permitted line plus a "\r\n" terminator.
        let limit = (self.max_line_length + 2) as u64;
        let n = (&mut self.inner).take(limit).read_until(b'\n', &mut self.bytes)?;
        if n == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let terminated = self.bytes.last() == Some(&b'\n');
        if !terminated && n as u64 == limit {
            return Err(self.too_long());
        }
        if terminated {
            self.bytes.pop();
        }
        if self.bytes.last() == Some(&b'\r') {
            self.bytes.pop();
        }
        if self.bytes.len() > self.max_line_length {
            return Err(self.too_long());
        }

        self.text.clear();
        self.text.push_str(&String::from_utf8_lossy(&self.bytes));
        Ok(Some(Line {
            number: self.line_number,
            text: &self.text,
        }))
    }

    fn too_long(&self) -> MeshIoError {
        MeshIoError::LineTooLong {
            line: self.line_number,
            max: self.max_line_length,
        }
    }
}
