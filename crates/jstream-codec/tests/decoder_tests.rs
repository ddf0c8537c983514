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

//! Integration tests for jstream-codec

use jstream_codec::{DecodeError, DecoderConfig, JsonStreamDecoder, Position, Record, Value};
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Cursor, Read, Write};
use std::rc::Rc;
use tempfile::NamedTempFile;

// ==================== Test Readers ====================

/// Hands out at most one byte per read.
struct OneByteReader<R>(R);

impl<R: Read> Read for OneByteReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.0.read(&mut buf[..1])
    }
}

/// Serves a fixed prefix, then fails every read.
struct FailAfter {
    data: Cursor<Vec<u8>>,
}

impl Read for FailAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.read(buf)?;
        if n == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"));
        }
        Ok(n)
    }
}

/// A shared byte queue standing in for a file that is still being written.
#[derive(Clone, Default)]
struct GrowingSource(Rc<RefCell<VecDeque<u8>>>);

impl GrowingSource {
    fn append(&self, data: &str) {
        self.0.borrow_mut().extend(data.bytes());
    }
}

impl Read for GrowingSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut queue = self.0.borrow_mut();
        let n = buf.len().min(queue.len());
        for (slot, byte) in buf.iter_mut().zip(queue.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

fn decode_all(input: &str) -> (Vec<Value>, Option<DecodeError>) {
    let mut decoder = JsonStreamDecoder::new("file/path", Cursor::new(input));
    let values = decoder.by_ref().map(Record::into_value).collect();
    (values, decoder.finish().error)
}

// ==================== Basic Decoding Tests ====================

#[test]
fn test_empty_stream() {
    let (values, err) = decode_all("");
    assert!(values.is_empty());
    assert!(err.is_none());
}

#[test]
fn test_single_object() {
    let (values, err) = decode_all(r#"{"foo":"bar"}"#);
    assert_eq!(values, vec![json!({"foo": "bar"})]);
    assert!(err.is_none());
}

#[test]
fn test_concatenated_objects() {
    let (values, err) = decode_all(r#"{"foo":"bar"}{"bar":"bazz"}"#);
    assert_eq!(values, vec![json!({"foo": "bar"}), json!({"bar": "bazz"})]);
    assert!(err.is_none());
}

#[test]
fn test_newline_delimited_objects() {
    let (values, err) = decode_all("{\"foo\":\"bar\"}\n{\"bar\":\"bazz\"}\n");
    assert_eq!(values.len(), 2);
    assert!(err.is_none());
}

#[test]
fn test_crlf_delimited_objects() {
    let (values, err) = decode_all("{\"a\":1}\r\n{\"a\":2}\r\n\r\n");
    assert_eq!(values, vec![json!({"a": 1}), json!({"a": 2})]);
    assert!(err.is_none());
}

#[test]
fn test_mixed_top_level_values() {
    let (values, err) = decode_all(r#"[1,2] "text" 42 true null {"nested":{"deep":[{}]}}"#);
    assert_eq!(
        values,
        vec![
            json!([1, 2]),
            json!("text"),
            json!(42),
            json!(true),
            json!(null),
            json!({"nested": {"deep": [{}]}}),
        ]
    );
    assert!(err.is_none());
}

#[test]
fn test_unicode_content() {
    let (values, err) = decode_all("{\"name\":\"Zoë\"}{\"emoji\":\"\\ud83d\\ude00\"}");
    assert_eq!(values[0]["name"], "Zoë");
    assert_eq!(values[1]["emoji"], "😀");
    assert!(err.is_none());
}

// ==================== Error Tests ====================

#[test]
fn test_garbage_after_object() {
    let (values, err) = decode_all(r#"{"foo":"bar"}aaa"#);
    assert_eq!(values, vec![json!({"foo": "bar"})]);
    match err {
        Some(DecodeError::Syntax { line, offset, .. }) => {
            assert_eq!(line, 1);
            assert_eq!(offset, 13);
        }
        other => panic!("Expected Syntax error, got {:?}", other),
    }
}

#[test]
fn test_object_member_outside_object() {
    let (values, err) = decode_all(r#""foo":"#);
    assert!(values.is_empty());
    assert!(matches!(err, Some(DecodeError::TrailingCharacters { .. })));
}

#[test]
fn test_truncated_final_value() {
    let (values, err) = decode_all("{\"a\":1}\n{\"b\":");
    assert_eq!(values.len(), 1);
    match err {
        Some(DecodeError::UnexpectedEof { line, offset, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(offset, 8);
        }
        other => panic!("Expected UnexpectedEof, got {:?}", other),
    }
}

#[test]
fn test_invalid_utf8_is_rejected() {
    let input: &[u8] = b"{\"a\":1} \"\xff\"";
    let mut decoder = JsonStreamDecoder::new("bytes", input);
    assert!(decoder.advance());
    assert!(!decoder.advance());
    assert!(matches!(decoder.err(), Some(DecodeError::Syntax { .. })));
}

#[test]
fn test_error_display_mentions_position() {
    let (_, err) = decode_all("[1]\n[2]\n  ]");
    let message = err.expect("stray closer must fail").to_string();
    assert!(message.contains("line 3, column 3"), "got: {message}");
    assert!(message.contains("`]`"), "got: {message}");
}

#[test]
fn test_error_stays_latched() {
    let mut decoder = JsonStreamDecoder::new("file/path", Cursor::new("{} , {} {}"));
    assert!(decoder.advance());
    for _ in 0..5 {
        assert!(!decoder.advance());
        assert!(decoder.current_value().is_none());
        assert!(matches!(
            decoder.err(),
            Some(DecodeError::UnexpectedCharacter { offset: 3, .. })
        ));
    }
    assert_eq!(decoder.decoded_count(), 1);
    assert!(decoder.next().is_none());
}

// ==================== Reader Tests ====================

#[test]
fn test_one_byte_reads() {
    let input = "{\"a\":[1,2,3]}  \"x\"\n7 {\"b\":\"]\"}";
    let mut decoder = JsonStreamDecoder::new("slow", OneByteReader(Cursor::new(input)));
    let values: Vec<Value> = decoder.by_ref().map(Record::into_value).collect();

    assert_eq!(
        values,
        vec![json!({"a": [1, 2, 3]}), json!("x"), json!(7), json!({"b": "]"})]
    );
    assert!(decoder.err().is_none());
}

#[test]
fn test_read_failure_latches_io_error() {
    let reader = FailAfter {
        data: Cursor::new(b"{\"ok\":1}\n".to_vec()),
    };
    let mut decoder = JsonStreamDecoder::new("pipe", reader);

    assert!(decoder.advance());
    assert!(!decoder.advance());

    let err = decoder.err().expect("read failure must latch");
    assert!(err.is_io());
    assert_eq!(err.offset(), Some(9));
    assert!(err.to_string().contains("peer went away"));
    assert!(!decoder.advance());
}

#[test]
fn test_value_larger_than_buffer() {
    let payload = "x".repeat(200_000);
    let input = format!("{{\"payload\":\"{payload}\"}} {{\"next\":true}}");
    let config = DecoderConfig::builder().buffer_size(1024).build();
    let mut decoder = JsonStreamDecoder::with_config("big", Cursor::new(input), config);

    assert!(decoder.advance());
    assert_eq!(
        decoder.current_value().unwrap()["payload"].as_str().map(str::len),
        Some(200_000)
    );
    assert!(decoder.advance());
    assert!(!decoder.advance());
    assert!(decoder.err().is_none());
}

#[test]
fn test_decode_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..100 {
        writeln!(file, "{{\"seq\":{i},\"msg\":\"line {i}\"}}").unwrap();
    }
    file.flush().unwrap();

    let source = file.path().display().to_string();
    let mut decoder = JsonStreamDecoder::new(source.as_str(), File::open(file.path()).unwrap());

    let mut expected = 0;
    while decoder.advance() {
        let record = decoder.current().unwrap();
        assert_eq!(record.source(), source);
        assert_eq!(record.index, expected);
        assert_eq!(record.position.line, expected as usize + 1);
        assert_eq!(record.value["seq"], expected);
        expected += 1;
    }
    assert_eq!(expected, 100);
    assert!(decoder.err().is_none());
}

#[test]
fn test_borrowed_reader_can_be_reused() {
    let mut source = Cursor::new("[1] [2]");
    {
        let mut decoder = JsonStreamDecoder::new("borrowed", &mut source);
        assert!(decoder.advance());
        assert!(decoder.advance());
        assert!(!decoder.advance());
    }
    assert_eq!(source.position(), 7);
}

// ==================== Resume Tests ====================

#[test]
fn test_resume_after_clean_end() {
    let source = GrowingSource::default();
    let mut decoder = JsonStreamDecoder::new("tail", source.clone());

    assert!(!decoder.advance());
    assert!(decoder.err().is_none());

    source.append("{\"n\":1}\n");
    assert!(decoder.advance());
    assert_eq!(decoder.current_value(), Some(&json!({"n": 1})));
    assert!(!decoder.advance());
    assert!(decoder.err().is_none());

    source.append("{\"n\":2}{\"n\":3}");
    let rest: Vec<u64> = decoder.by_ref().map(|r| r.index).collect();
    assert_eq!(rest, vec![1, 2]);

    let record_position = {
        source.append("\n []");
        assert!(decoder.advance());
        decoder.current().unwrap().position
    };
    assert_eq!(
        record_position,
        Position {
            offset: 24,
            line: 3,
            column: 2
        }
    );
}

#[test]
fn test_no_resume_after_error() {
    let source = GrowingSource::default();
    let mut decoder = JsonStreamDecoder::new("tail", source.clone());

    source.append("] ");
    assert!(!decoder.advance());
    assert!(decoder.err().is_some());

    source.append("{\"n\":1}");
    assert!(!decoder.advance());
    assert!(decoder.err().is_some());
    assert_eq!(decoder.decoded_count(), 0);
}

// ==================== Limit Tests ====================

#[test]
fn test_default_limits_accept_deep_nesting() {
    let input = format!("{}{}", "[".repeat(100), "]".repeat(100));
    let (values, err) = decode_all(&input);
    assert_eq!(values.len(), 1);
    assert!(err.is_none());
}

#[test]
fn test_depth_limit_rejects_deep_nesting() {
    let input = format!("{}{}", "[".repeat(200), "]".repeat(200));
    let (values, err) = decode_all(&input);
    assert!(values.is_empty());
    assert!(matches!(
        err,
        Some(DecodeError::DepthLimitExceeded { limit: 127, column: 128, .. })
    ));
}

#[test]
fn test_unlimited_value_size() {
    let input = format!("\"{}\"", "y".repeat(4096));
    let config = DecoderConfig::builder()
        .max_value_bytes(1024)
        .unlimited_value_size()
        .build();
    let mut decoder = JsonStreamDecoder::with_config("s", Cursor::new(input), config);
    assert!(decoder.advance());
    assert!(decoder.err().is_none());
}
