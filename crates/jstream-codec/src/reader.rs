// Dweve JStream - Streaming decoder for concatenated JSON
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Byte reader for the stream decoder.
//!
//! Provides buffered byte-at-a-time reading with one byte of lookahead and
//! position tracking (byte offset, line, column) for error reporting.
//!
//! This module is primarily an internal implementation detail of the decoder,
//! but is exposed for advanced use cases.

use crate::error::{DecodeError, DecodeResult};
use std::fmt;
use std::io::{BufRead, BufReader, ErrorKind, Read};

/// A position in a byte stream.
///
/// `offset` counts consumed bytes from zero; `line` and `column` are 1-based,
/// with columns counted in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Number of bytes consumed before this position.
    pub offset: u64,
    /// Line number, starting at 1.
    pub line: usize,
    /// Column in bytes, starting at 1.
    pub column: usize,
}

impl Position {
    /// The position of the first byte of a stream.
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {} (byte {})",
            self.line, self.column, self.offset
        )
    }
}

/// Buffered byte reader with position tracking.
///
/// Only bytes handed out by [`next_byte`](Self::next_byte) or skipped by
/// [`skip_whitespace`](Self::skip_whitespace) count as consumed; a byte seen
/// through [`peek`](Self::peek) stays in the buffer for the next caller.
/// Reads interrupted by a signal are retried.
///
/// # Examples
///
/// ```rust
/// use jstream_codec::ByteReader;
/// use std::io::Cursor;
///
/// let mut reader = ByteReader::new(Cursor::new("  \n{}"));
///
/// assert_eq!(reader.skip_whitespace().unwrap(), Some(b'{'));
/// assert_eq!(reader.position().line, 2);
///
/// assert_eq!(reader.next_byte().unwrap(), Some(b'{'));
/// assert_eq!(reader.next_byte().unwrap(), Some(b'}'));
/// assert_eq!(reader.next_byte().unwrap(), None);
/// assert_eq!(reader.position().offset, 5);
/// ```
pub struct ByteReader<R: Read> {
    reader: BufReader<R>,
    position: Position,
}

impl<R: Read> ByteReader<R> {
    /// Create a new byte reader with the default buffer capacity.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            position: Position::start(),
        }
    }

    /// Create with a specific buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity.max(1), reader),
            position: Position::start(),
        }
    }

    /// Get the position of the next unconsumed byte.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Look at the next byte without consuming it.
    ///
    /// Returns `None` when the underlying reader reports end of stream. A
    /// later call reads again, so a reader that grows picks up new bytes.
    pub fn peek(&mut self) -> DecodeResult<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecodeError::io(self.position.offset, e)),
            }
        }
    }

    /// Read and consume the next byte.
    pub fn next_byte(&mut self) -> DecodeResult<Option<u8>> {
        let byte = self.peek()?;
        if let Some(byte) = byte {
            self.consume(byte);
        }
        Ok(byte)
    }

    /// Consume JSON whitespace and return the first other byte, unconsumed.
    pub fn skip_whitespace(&mut self) -> DecodeResult<Option<u8>> {
        while let Some(byte) = self.peek()? {
            if !is_whitespace(byte) {
                return Ok(Some(byte));
            }
            self.consume(byte);
        }
        Ok(None)
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// Unwrap into the buffered reader, keeping any bytes already buffered.
    pub fn into_inner(self) -> BufReader<R> {
        self.reader
    }

    fn consume(&mut self, byte: u8) {
        self.reader.consume(1);
        self.position.offset += 1;
        if byte == b'\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
    }
}

/// Insignificant whitespace as defined by RFC 8259.
#[inline]
pub(crate) fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}
