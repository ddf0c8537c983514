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

//! Value boundary scanning.
//!
//! The scanner finds where one top-level JSON value ends without decoding it.
//! It copies the value's bytes into a reusable buffer while tracking string
//! state and bracket nesting, so the complete value can be handed to
//! `serde_json` in one piece. Only the bytes of the value itself (plus leading
//! whitespace) are consumed from the reader.
//!
//! Boundary rules:
//!
//! - `{` and `[` end at their matching closer; brackets inside strings are ignored
//! - `"` ends at the next unescaped `"`
//! - anything else is a bare token (number, literal or garbage) ending before
//!   the next whitespace, structural character or quote
//!
//! A scalar must be followed by whitespace, the end of the stream, or the
//! start of a value that delimits itself (`{`, `[`, `"`). See
//! [`ValueScanner::expect_boundary`].

use crate::error::{DecodeError, DecodeResult};
use crate::reader::{is_whitespace, ByteReader, Position};
use std::io::Read;

/// Capacity the value buffer keeps between values; anything above is freed.
const RETAINED_CAPACITY: usize = 64 * 1024;

/// Boundary class of a scanned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueKind {
    /// Object or array.
    Container,
    /// String.
    String,
    /// Number, literal, or an invalid token left for the JSON parser to reject.
    Bare,
}

impl ValueKind {
    /// Containers carry their own terminator; scalars need a delimiter after them.
    #[inline]
    pub(crate) fn is_self_delimiting(self) -> bool {
        matches!(self, Self::Container)
    }
}

/// A value located by the scanner; its bytes live in [`ValueScanner::bytes`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScannedValue {
    pub kind: ValueKind,
    pub start: Position,
}

/// Reusable boundary scanner.
#[derive(Debug)]
pub(crate) struct ValueScanner {
    buf: Vec<u8>,
    /// Expected closers of the open containers, innermost last.
    closers: Vec<u8>,
    max_value_bytes: Option<usize>,
    max_depth: usize,
}

impl ValueScanner {
    pub(crate) fn new(max_value_bytes: Option<usize>, max_depth: usize) -> Self {
        Self {
            buf: Vec::new(),
            closers: Vec::new(),
            max_value_bytes,
            max_depth,
        }
    }

    /// Bytes of the most recently scanned value.
    #[inline]
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Drop the captured bytes and give back memory held for an oversized value.
    pub(crate) fn release(&mut self) {
        self.buf.clear();
        self.closers.clear();
        if self.buf.capacity() > RETAINED_CAPACITY {
            self.buf.shrink_to(RETAINED_CAPACITY);
        }
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Skip leading whitespace and capture exactly one value.
    ///
    /// Returns `Ok(None)` on a clean end of stream.
    pub(crate) fn scan<R: Read>(
        &mut self,
        reader: &mut ByteReader<R>,
    ) -> DecodeResult<Option<ScannedValue>> {
        self.release();

        let Some(first) = reader.skip_whitespace()? else {
            return Ok(None);
        };
        let start = reader.position();

        let kind = match first {
            b'{' | b'[' => {
                self.scan_container(reader, start)?;
                ValueKind::Container
            }
            b'"' => {
                reader.next_byte()?;
                self.push(b'"', start, start)?;
                self.scan_string_body(reader, start)?;
                ValueKind::String
            }
            b'}' | b']' | b',' | b':' => {
                return Err(DecodeError::unexpected_character(
                    start,
                    start,
                    first,
                    "expected the start of a JSON value",
                ));
            }
            _ => {
                self.scan_bare(reader, start)?;
                ValueKind::Bare
            }
        };

        Ok(Some(ScannedValue { kind, start }))
    }

    /// Check that the byte after a scalar can end it. The byte is not consumed.
    pub(crate) fn expect_boundary<R: Read>(
        &self,
        reader: &mut ByteReader<R>,
        start: Position,
    ) -> DecodeResult<()> {
        match reader.peek()? {
            None => Ok(()),
            Some(byte) if is_whitespace(byte) || matches!(byte, b'{' | b'[' | b'"') => Ok(()),
            Some(byte) => Err(DecodeError::trailing_characters(
                reader.position(),
                start,
                byte,
            )),
        }
    }

    fn scan_container<R: Read>(
        &mut self,
        reader: &mut ByteReader<R>,
        start: Position,
    ) -> DecodeResult<()> {
        loop {
            let at = reader.position();
            let Some(byte) = reader.next_byte()? else {
                return Err(DecodeError::unexpected_eof(
                    at,
                    start,
                    "unterminated object or array",
                ));
            };
            self.push(byte, at, start)?;

            match byte {
                b'{' => self.open(b'}', at, start)?,
                b'[' => self.open(b']', at, start)?,
                b'}' | b']' => {
                    let expected = self.closers.pop();
                    if expected != Some(byte) {
                        let message = match expected {
                            Some(closer) => format!("expected `{}`", closer as char),
                            None => "no open object or array".to_string(),
                        };
                        return Err(DecodeError::unexpected_character(at, start, byte, message));
                    }
                    if self.closers.is_empty() {
                        return Ok(());
                    }
                }
                b'"' => self.scan_string_body(reader, start)?,
                _ => {}
            }
        }
    }

    /// Capture up to and including the closing quote; the opening quote is
    /// already in the buffer.
    fn scan_string_body<R: Read>(
        &mut self,
        reader: &mut ByteReader<R>,
        start: Position,
    ) -> DecodeResult<()> {
        let mut escaped = false;
        loop {
            let at = reader.position();
            let Some(byte) = reader.next_byte()? else {
                return Err(DecodeError::unexpected_eof(at, start, "unterminated string"));
            };
            self.push(byte, at, start)?;

            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                return Ok(());
            }
        }
    }

    fn scan_bare<R: Read>(&mut self, reader: &mut ByteReader<R>, start: Position) -> DecodeResult<()> {
        while let Some(byte) = reader.peek()? {
            if is_whitespace(byte) || is_delimiter(byte) {
                break;
            }
            let at = reader.position();
            reader.next_byte()?;
            self.push(byte, at, start)?;
        }
        Ok(())
    }

    fn open(&mut self, closer: u8, at: Position, start: Position) -> DecodeResult<()> {
        if self.closers.len() >= self.max_depth {
            return Err(DecodeError::depth_limit_exceeded(at, start, self.max_depth));
        }
        self.closers.push(closer);
        Ok(())
    }

    fn push(&mut self, byte: u8, at: Position, start: Position) -> DecodeResult<()> {
        if let Some(limit) = self.max_value_bytes {
            if self.buf.len() >= limit {
                return Err(DecodeError::value_too_large(at, start, limit));
            }
        }
        self.buf.push(byte);
        Ok(())
    }
}

/// Structural characters and the quote; each ends a bare token.
#[inline]
fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b'{' | b'}' | b'[' | b']' | b',' | b':' | b'"')
}
