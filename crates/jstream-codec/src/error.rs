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

//! Error types for the stream decoder.
//!
//! This module defines every error a [`JsonStreamDecoder`](crate::JsonStreamDecoder)
//! can latch. Apart from I/O failures, all errors carry the position where the
//! problem was detected (line and column) and the byte offset of the value that
//! was being decoded, both in stream coordinates.
//!
//! # Error Categories
//!
//! - **I/O Errors**: The underlying reader failed
//! - **Syntax Errors**: A complete value was captured but is not valid JSON
//! - **Framing Errors**: Stray or mismatched structural characters, trailing
//!   characters after a scalar, or a value truncated by the end of the stream
//! - **Limit Errors**: A value exceeded the configured size or nesting depth
//!
//! # Error Handling Examples
//!
//! ```rust
//! use jstream_codec::{DecodeError, JsonStreamDecoder};
//! use std::io::Cursor;
//!
//! let mut decoder = JsonStreamDecoder::new("inline", Cursor::new(r#"{"a":1} :"#));
//! while decoder.advance() {}
//!
//! match decoder.err() {
//!     Some(DecodeError::UnexpectedCharacter { line, column, .. }) => {
//!         assert_eq!((*line, *column), (1, 9));
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

use crate::reader::Position;
use std::io;
use thiserror::Error;

/// Errors that can occur while decoding a JSON stream.
///
/// Once a decoder latches one of these it never decodes again; see
/// [`JsonStreamDecoder::err`](crate::JsonStreamDecoder::err).
///
/// Positional fields:
/// - `line` / `column`: 1-based position where the problem was detected
/// - `offset`: byte offset of the first byte of the offending value
///
/// # Examples
///
/// ```rust
/// use jstream_codec::{DecodeError, Position};
///
/// let start = Position { offset: 40, line: 3, column: 1 };
/// let at = Position { offset: 47, line: 3, column: 8 };
/// let err = DecodeError::trailing_characters(at, start, b':');
///
/// assert_eq!(err.line(), Some(3));
/// assert_eq!(err.offset(), Some(40));
/// assert!(err.to_string().contains("line 3, column 8"));
/// ```
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Reading from the underlying stream failed.
    #[error("IO error at byte {offset}: {source}")]
    Io {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// The captured value is not valid JSON.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        offset: u64,
        message: String,
    },

    /// A byte that cannot appear at this point of a value.
    #[error("Unexpected {found} at line {line}, column {column}: {message}")]
    UnexpectedCharacter {
        line: usize,
        column: usize,
        offset: u64,
        found: String,
        message: String,
    },

    /// A scalar value is followed by a byte that cannot terminate it.
    #[error("Trailing {found} after top-level value at line {line}, column {column}")]
    TrailingCharacters {
        line: usize,
        column: usize,
        offset: u64,
        found: String,
    },

    /// The stream ended in the middle of a value.
    #[error("Unexpected end of stream at line {line}, column {column}: {message}")]
    UnexpectedEof {
        line: usize,
        column: usize,
        offset: u64,
        message: String,
    },

    /// A single value grew beyond the configured byte limit.
    #[error("Value starting at byte {offset} exceeds size limit of {limit} bytes (line {line}, column {column})")]
    ValueTooLarge {
        line: usize,
        column: usize,
        offset: u64,
        limit: usize,
    },

    /// Objects and arrays are nested deeper than the configured limit.
    #[error("Nesting depth exceeds limit of {limit} at line {line}, column {column}")]
    DepthLimitExceeded {
        line: usize,
        column: usize,
        offset: u64,
        limit: usize,
    },
}

impl DecodeError {
    /// Create an I/O error at the given stream offset.
    #[inline]
    pub fn io(offset: u64, source: io::Error) -> Self {
        Self::Io { offset, source }
    }

    /// Create a syntax error detected at `at` in the value starting at `start`.
    #[inline]
    pub fn syntax(at: Position, start: Position, message: impl Into<String>) -> Self {
        Self::Syntax {
            line: at.line,
            column: at.column,
            offset: start.offset,
            message: message.into(),
        }
    }

    /// Create an unexpected character error for `byte` found at `at`.
    #[inline]
    pub fn unexpected_character(
        at: Position,
        start: Position,
        byte: u8,
        message: impl Into<String>,
    ) -> Self {
        Self::UnexpectedCharacter {
            line: at.line,
            column: at.column,
            offset: start.offset,
            found: describe_byte(byte),
            message: message.into(),
        }
    }

    /// Create a trailing characters error for `byte` found at `at`.
    #[inline]
    pub fn trailing_characters(at: Position, start: Position, byte: u8) -> Self {
        Self::TrailingCharacters {
            line: at.line,
            column: at.column,
            offset: start.offset,
            found: describe_byte(byte),
        }
    }

    /// Create an end-of-stream error; `at` is where the stream ended.
    #[inline]
    pub fn unexpected_eof(at: Position, start: Position, message: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            line: at.line,
            column: at.column,
            offset: start.offset,
            message: message.into(),
        }
    }

    /// Create a value size limit error.
    #[inline]
    pub fn value_too_large(at: Position, start: Position, limit: usize) -> Self {
        Self::ValueTooLarge {
            line: at.line,
            column: at.column,
            offset: start.offset,
            limit,
        }
    }

    /// Create a nesting depth limit error.
    #[inline]
    pub fn depth_limit_exceeded(at: Position, start: Position, limit: usize) -> Self {
        Self::DepthLimitExceeded {
            line: at.line,
            column: at.column,
            offset: start.offset,
            limit,
        }
    }

    /// Translate a `serde_json` error on a captured value into stream coordinates.
    ///
    /// `serde_json` reports positions relative to the value's own bytes;
    /// `start` is where those bytes begin in the stream.
    pub fn from_json(err: &serde_json::Error, start: Position) -> Self {
        let at = if err.line() <= 1 {
            Position {
                offset: start.offset,
                line: start.line,
                column: start.column + err.column().saturating_sub(1),
            }
        } else {
            Position {
                offset: start.offset,
                line: start.line + err.line() - 1,
                column: err.column(),
            }
        };
        Self::syntax(at, start, json_message(err))
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io { .. } => None,
            Self::Syntax { line, .. }
            | Self::UnexpectedCharacter { line, .. }
            | Self::TrailingCharacters { line, .. }
            | Self::UnexpectedEof { line, .. }
            | Self::ValueTooLarge { line, .. }
            | Self::DepthLimitExceeded { line, .. } => Some(*line),
        }
    }

    /// Get the column number if available.
    #[inline]
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::Io { .. } => None,
            Self::Syntax { column, .. }
            | Self::UnexpectedCharacter { column, .. }
            | Self::TrailingCharacters { column, .. }
            | Self::UnexpectedEof { column, .. }
            | Self::ValueTooLarge { column, .. }
            | Self::DepthLimitExceeded { column, .. } => Some(*column),
        }
    }

    /// Get the byte offset associated with the error.
    ///
    /// For I/O errors this is the number of bytes consumed before the failed
    /// read; for all other errors it is the offset of the offending value.
    #[inline]
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::Io { offset, .. }
            | Self::Syntax { offset, .. }
            | Self::UnexpectedCharacter { offset, .. }
            | Self::TrailingCharacters { offset, .. }
            | Self::UnexpectedEof { offset, .. }
            | Self::ValueTooLarge { offset, .. }
            | Self::DepthLimitExceeded { offset, .. } => Some(*offset),
        }
    }

    /// Whether the error came from the underlying reader rather than the data.
    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Render a byte for error messages: printable ASCII as a quoted character,
/// anything else as hex.
fn describe_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("character `{}`", byte as char)
    } else {
        format!("byte 0x{:02x}", byte)
    }
}

/// `serde_json` appends " at line N column M" relative to the value; drop it.
fn json_message(err: &serde_json::Error) -> String {
    let full = err.to_string();
    if err.line() == 0 {
        return full;
    }
    match full.rfind(" at line ") {
        Some(idx) => full[..idx].to_string(),
        None => full,
    }
}
