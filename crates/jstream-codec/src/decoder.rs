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

//! Stream decoder implementation.
//!
//! [`JsonStreamDecoder`] pulls one top-level JSON value at a time out of any
//! [`Read`] source. Values may be separated by whitespace or simply
//! concatenated. The first malformed value latches a sticky error: from then
//! on the decoder yields nothing, and the values decoded before the failure
//! remain valid.
//!
//! # Design Philosophy
//!
//! - **Memory Efficiency**: Only the value being decoded is buffered
//! - **Pull-Based**: Nothing is read until the caller asks for the next value
//! - **Sticky Errors**: A failure is reported once and never cleared or retried
//!
//! # Basic Usage
//!
//! ```rust
//! use jstream_codec::JsonStreamDecoder;
//! use std::io::Cursor;
//!
//! let input = r#"{"foo":"bar"}{"bar":"bazz"}
//! {"baz":1}"#;
//!
//! let mut decoder = JsonStreamDecoder::new("inline", Cursor::new(input));
//! let mut count = 0;
//! while decoder.advance() {
//!     assert!(decoder.current_value().unwrap().is_object());
//!     count += 1;
//! }
//!
//! assert_eq!(count, 3);
//! assert!(decoder.err().is_none());
//! ```

use crate::error::{DecodeError, DecodeResult};
use crate::reader::{ByteReader, Position};
use crate::record::Record;
use crate::scanner::ValueScanner;
use serde_json::Value;
use std::io::{BufReader, Read};
use std::sync::Arc;
use tracing::{debug, trace};

/// Default read buffer capacity (64 KB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Default per-value size limit (10 MB).
pub const DEFAULT_MAX_VALUE_BYTES: usize = 10 * 1024 * 1024;

/// Deepest nesting the decoder supports.
///
/// `serde_json` refuses values nested deeper than this, so larger
/// `max_depth` settings are clamped to it.
pub const MAX_DEPTH_LIMIT: usize = 127;

/// Default nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = MAX_DEPTH_LIMIT;

/// Configuration for the stream decoder.
///
/// # Examples
///
/// ```rust
/// use jstream_codec::DecoderConfig;
///
/// let config = DecoderConfig::default();
/// assert_eq!(config.buffer_size, 64 * 1024);
/// assert_eq!(config.max_value_bytes, Some(10 * 1024 * 1024));
/// assert_eq!(config.max_depth, 127);
///
/// // Conservative limits for untrusted input
/// let strict = DecoderConfig::builder()
///     .buffer_size(8 * 1024)
///     .max_value_bytes(64 * 1024)
///     .max_depth(32)
///     .build();
/// assert_eq!(strict.max_depth, 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Capacity of the internal read buffer in bytes.
    ///
    /// Default: 64 KB
    pub buffer_size: usize,

    /// Maximum bytes in a single top-level value, or `None` for no limit.
    ///
    /// Bounds the memory a single value can claim. Exceeding it latches
    /// [`DecodeError::ValueTooLarge`].
    ///
    /// Default: 10 MB
    pub max_value_bytes: Option<usize>,

    /// Maximum nesting depth of objects and arrays.
    ///
    /// Exceeding it latches [`DecodeError::DepthLimitExceeded`]. Values above
    /// [`MAX_DEPTH_LIMIT`] are clamped to it when the decoder is created.
    ///
    /// Default: 127
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_value_bytes: Some(DEFAULT_MAX_VALUE_BYTES),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecoderConfig {
    /// Create a new builder starting from the defaults.
    pub fn builder() -> DecoderConfigBuilder {
        DecoderConfigBuilder::default()
    }
}

/// Builder for [`DecoderConfig`].
#[derive(Debug, Clone, Default)]
pub struct DecoderConfigBuilder {
    config: DecoderConfig,
}

impl DecoderConfigBuilder {
    /// Set the read buffer size in bytes
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = size;
        self
    }

    /// Set the maximum size of a single value in bytes
    pub fn max_value_bytes(mut self, limit: usize) -> Self {
        self.config.max_value_bytes = Some(limit);
        self
    }

    /// Disable the value size limit
    pub fn unlimited_value_size(mut self) -> Self {
        self.config.max_value_bytes = None;
        self
    }

    /// Set the maximum nesting depth, clamped to [`MAX_DEPTH_LIMIT`]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth.min(MAX_DEPTH_LIMIT);
        self
    }

    /// Build the configuration
    pub fn build(self) -> DecoderConfig {
        self.config
    }
}

/// Pull-based decoder for a stream of concatenated JSON values.
///
/// The decoder binds an opaque source identifier (used only for tagging and
/// diagnostics) to a byte stream. Each [`advance`](Self::advance) decodes
/// exactly one top-level value; [`current_value`](Self::current_value) and
/// [`err`](Self::err) expose the outcome.
///
/// # Ownership of the Reader
///
/// The reader is wrapped in a `BufReader`, so bytes past the current value
/// may already be buffered. Pass `&mut reader` to keep ownership, and use
/// [`into_inner`](Self::into_inner) to recover the buffered remainder. Do not
/// read from the source behind the decoder's back.
///
/// # Termination
///
/// - Clean end of stream: `advance` returns `false` and `err` stays `None`.
///   Advancing again re-reads the source, so a file that keeps growing can be
///   followed with the same decoder.
/// - Malformed input: `advance` returns `false` and `err` becomes `Some`.
///   The error is sticky; later calls return `false` without reading.
///
/// # Iterator Interface
///
/// `JsonStreamDecoder` implements `Iterator<Item = Record>`. Iteration moves
/// each record out, so `current_value` is `None` while iterating. Check
/// [`err`](Self::err) once the iterator is exhausted.
///
/// # Examples
///
/// ## Counting Values Before a Failure
///
/// ```rust
/// use jstream_codec::JsonStreamDecoder;
/// use std::io::Cursor;
///
/// let mut decoder = JsonStreamDecoder::new("file/path", Cursor::new(r#"{"foo":"bar"}aaa"#));
///
/// let mut count = 0;
/// while decoder.advance() {
///     count += 1;
/// }
///
/// assert_eq!(count, 1);
/// assert!(decoder.err().is_some());
/// assert!(!decoder.advance());
/// ```
///
/// ## Iterating Records
///
/// ```rust
/// use jstream_codec::JsonStreamDecoder;
/// use std::io::Cursor;
///
/// let mut decoder = JsonStreamDecoder::new("numbers", Cursor::new("1 2 3"));
/// let sum: i64 = decoder.by_ref().filter_map(|r| r.value.as_i64()).sum();
///
/// assert_eq!(sum, 6);
/// assert!(decoder.finish().is_clean());
/// ```
pub struct JsonStreamDecoder<R: Read> {
    source: Arc<str>,
    reader: ByteReader<R>,
    scanner: ValueScanner,
    config: DecoderConfig,
    current: Option<Record>,
    error: Option<DecodeError>,
    decoded: u64,
}

impl<R: Read> JsonStreamDecoder<R> {
    /// Create a decoder with the default configuration. No I/O happens here.
    pub fn new(source: impl Into<Arc<str>>, reader: R) -> Self {
        Self::with_config(source, reader, DecoderConfig::default())
    }

    /// Create a decoder with a custom configuration. No I/O happens here.
    ///
    /// A `max_depth` above [`MAX_DEPTH_LIMIT`] is clamped to it.
    pub fn with_config(source: impl Into<Arc<str>>, reader: R, mut config: DecoderConfig) -> Self {
        config.max_depth = config.max_depth.min(MAX_DEPTH_LIMIT);
        let source = source.into();
        debug!(source = %source, buffer_size = config.buffer_size, "created JSON stream decoder");
        Self {
            reader: ByteReader::with_capacity(reader, config.buffer_size),
            scanner: ValueScanner::new(config.max_value_bytes, config.max_depth),
            source,
            config,
            current: None,
            error: None,
            decoded: 0,
        }
    }

    /// Decode the next top-level value.
    ///
    /// Returns `true` if a value was decoded; it is then available from
    /// [`current_value`](Self::current_value). Returns `false` at a clean end
    /// of stream or when decoding failed; [`err`](Self::err) tells the two
    /// apart. Once an error is latched this returns `false` without reading.
    pub fn advance(&mut self) -> bool {
        self.current = None;
        if self.error.is_some() {
            return false;
        }

        match self.decode_next() {
            Ok(Some(record)) => {
                self.decoded += 1;
                trace!(
                    source = %self.source,
                    index = record.index,
                    offset = record.position.offset,
                    "decoded value"
                );
                self.current = Some(record);
                true
            }
            Ok(None) => {
                debug!(source = %self.source, decoded = self.decoded, "reached end of stream");
                false
            }
            Err(err) => {
                self.scanner.release();
                debug!(
                    source = %self.source,
                    decoded = self.decoded,
                    offset = err.offset(),
                    error = %err,
                    "stream decoding failed"
                );
                self.error = Some(err);
                false
            }
        }
    }

    fn decode_next(&mut self) -> DecodeResult<Option<Record>> {
        let Some(scanned) = self.scanner.scan(&mut self.reader)? else {
            return Ok(None);
        };

        let value: Value = serde_json::from_slice(self.scanner.bytes())
            .map_err(|err| DecodeError::from_json(&err, scanned.start))?;
        self.scanner.release();

        if !scanned.kind.is_self_delimiting() {
            self.scanner.expect_boundary(&mut self.reader, scanned.start)?;
        }

        Ok(Some(Record {
            source: Arc::clone(&self.source),
            index: self.decoded,
            position: scanned.start,
            value,
        }))
    }

    /// The value decoded by the most recent successful [`advance`](Self::advance).
    ///
    /// `None` before the first advance and after any advance that returned `false`.
    #[inline]
    pub fn current_value(&self) -> Option<&Value> {
        self.current.as_ref().map(|record| &record.value)
    }

    /// The most recent record, including its source tag and position.
    #[inline]
    pub fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    /// The sticky decoding error, if any.
    #[inline]
    pub fn err(&self) -> Option<&DecodeError> {
        self.error.as_ref()
    }

    /// The source identifier given at construction.
    #[inline]
    pub fn source_id(&self) -> &str {
        &self.source
    }

    /// Number of values decoded so far.
    #[inline]
    pub fn decoded_count(&self) -> u64 {
        self.decoded
    }

    /// Position of the next unconsumed byte.
    #[inline]
    pub fn position(&self) -> Position {
        self.reader.position()
    }

    /// The configuration in use.
    #[inline]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Unwrap into the buffered reader positioned right after the last
    /// consumed byte.
    pub fn into_inner(self) -> BufReader<R> {
        self.reader.into_inner()
    }

    /// Consume the decoder and report how it ended.
    pub fn finish(self) -> DecodeSummary {
        DecodeSummary {
            source: self.source,
            decoded: self.decoded,
            error: self.error,
        }
    }
}

impl<R: Read> Iterator for JsonStreamDecoder<R> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.current.take()
        } else {
            None
        }
    }
}

/// Final state of a decoder, returned by [`JsonStreamDecoder::finish`].
#[derive(Debug)]
pub struct DecodeSummary {
    /// Source identifier of the decoder.
    pub source: Arc<str>,
    /// Number of values decoded before the decoder stopped.
    pub decoded: u64,
    /// The sticky error, if decoding failed.
    pub error: Option<DecodeError>,
}

impl DecodeSummary {
    /// Whether the stream was a clean concatenation of valid values.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}
