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

//! Decoded values tagged with their origin.

use crate::reader::Position;
use serde_json::Value;
use std::sync::Arc;

/// One decoded top-level value and where it came from.
///
/// # Examples
///
/// ```rust
/// use jstream_codec::JsonStreamDecoder;
/// use std::io::Cursor;
///
/// let mut decoder = JsonStreamDecoder::new("events.json", Cursor::new("\n{\"id\":7}"));
/// let record = decoder.next().unwrap();
///
/// assert_eq!(record.source(), "events.json");
/// assert_eq!(record.index, 0);
/// assert_eq!(record.position.line, 2);
/// assert_eq!(record.value["id"], 7);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Source identifier of the decoder that produced the value.
    pub source: Arc<str>,
    /// Zero-based index of the value within its stream.
    pub index: u64,
    /// Position of the value's first byte.
    pub position: Position,
    /// The decoded value.
    pub value: Value,
}

impl Record {
    /// Source identifier as a string slice.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte offset of the value's first byte.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.position.offset
    }

    /// Discard the tags and keep the value.
    #[inline]
    pub fn into_value(self) -> Value {
        self.value
    }
}
