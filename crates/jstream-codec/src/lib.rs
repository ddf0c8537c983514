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

//! Streaming JSON Decoder
//!
//! This crate decodes a byte stream made of zero or more complete JSON values
//! placed back to back, with or without whitespace between them. Log files,
//! NDJSON exports and sockets that emit one object per event are all handled
//! the same way: one top-level value at a time, without loading the stream
//! into memory.
//!
//! # Features
//!
//! - **Memory Efficient**: Only the value currently being decoded is buffered
//! - **Pull-based**: `advance` / `current_value` / `err`, or a standard iterator
//! - **Sticky Errors**: The first malformed value stops the stream for good
//! - **Tagged Records**: Every value carries its source, index and position
//! - **Resource Limits**: Per-value size and nesting depth limits for untrusted input
//!
//! # Decoding a Stream
//!
//! ```rust,no_run
//! use jstream_codec::JsonStreamDecoder;
//! use std::fs::File;
//!
//! let file = File::open("events.json").unwrap();
//! let mut decoder = JsonStreamDecoder::new("events.json", file);
//!
//! while decoder.advance() {
//!     let event = decoder.current_value().unwrap();
//!     println!("{}", event["type"]);
//! }
//!
//! if let Some(err) = decoder.err() {
//!     eprintln!("Error: {}", err);
//! }
//! ```
//!
//! # Termination
//!
//! `advance` returning `false` means either a clean end of stream or a failure.
//! The two are told apart by [`JsonStreamDecoder::err`]:
//!
//! ```rust
//! use jstream_codec::JsonStreamDecoder;
//! use std::io::Cursor;
//!
//! let mut clean = JsonStreamDecoder::new("clean", Cursor::new("{\"a\":1}\n{\"b\":2}\n"));
//! while clean.advance() {}
//! assert!(clean.err().is_none());
//! assert_eq!(clean.decoded_count(), 2);
//!
//! let mut broken = JsonStreamDecoder::new("broken", Cursor::new(r#""foo":"#));
//! assert!(!broken.advance());
//! assert!(broken.err().is_some());
//! ```
//!
//! # Limits for Untrusted Input
//!
//! ```rust
//! use jstream_codec::{DecodeError, DecoderConfig, JsonStreamDecoder};
//! use std::io::Cursor;
//!
//! let config = DecoderConfig::builder()
//!     .max_value_bytes(16)
//!     .max_depth(8)
//!     .build();
//!
//! let input = r#"{"ok":true} {"payload":"far too long for the limit"}"#;
//! let mut decoder = JsonStreamDecoder::with_config("upload", Cursor::new(input), config);
//!
//! assert!(decoder.advance());
//! assert!(!decoder.advance());
//! assert!(matches!(decoder.err(), Some(DecodeError::ValueTooLarge { .. })));
//! ```

mod decoder;
mod error;
mod reader;
mod record;
mod scanner;

pub use decoder::{
    DecodeSummary, DecoderConfig, DecoderConfigBuilder, JsonStreamDecoder, DEFAULT_BUFFER_SIZE,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_VALUE_BYTES, MAX_DEPTH_LIMIT,
};
pub use error::{DecodeError, DecodeResult};
pub use reader::{ByteReader, Position};
pub use record::Record;

/// Re-export the value type for convenience.
pub use serde_json::Value;
