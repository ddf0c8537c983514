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

//! Decode command - print every value of one or more JSON streams

use super::open_input;
use crate::error::CliError;
use colored::Colorize;
use jstream_codec::{DecoderConfig, JsonStreamDecoder, Record};
use serde_json::json;
use std::io::{self, BufWriter, Write};
use tracing::debug;

/// Decode each input and write its values to stdout, one per line.
///
/// By default every line is a JSON object tagging the value with its source,
/// index and byte offset:
///
/// ```text
/// {"index":0,"offset":0,"source":"events.json","value":{"id":1}}
/// ```
///
/// With `raw` the bare value is written instead. `limit` caps the number of
/// values taken from each input.
///
/// # Errors
///
/// Returns `Err` if:
/// - An input cannot be opened (processing stops at that input)
/// - Writing to stdout fails
/// - Any input contained malformed JSON, after all inputs were processed.
///   Values before the malformed one are still written, and the decode error
///   is printed to stderr.
///
/// A closed stdout (e.g. piped into `head`) stops decoding early. Inputs that
/// already failed are still reported through [`CliError::Malformed`].
pub fn decode(
    inputs: &[String],
    config: &DecoderConfig,
    raw: bool,
    limit: Option<u64>,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    decode_to(&mut out, inputs, config, raw, limit)
}

fn decode_to<W: Write>(
    out: &mut W,
    inputs: &[String],
    config: &DecoderConfig,
    raw: bool,
    limit: Option<u64>,
) -> Result<(), CliError> {
    let mut failed = 0;

    for input in inputs {
        let (source, reader) = open_input(input)?;
        debug!(input = %source, "decoding input");

        let mut decoder = JsonStreamDecoder::with_config(source, reader, config.clone());
        while !limit.is_some_and(|n| decoder.decoded_count() >= n) && decoder.advance() {
            let Some(record) = decoder.current() else {
                continue;
            };
            match write_record(&mut *out, record, raw) {
                Ok(()) => {}
                Err(e) if is_broken_pipe(&e) => return outcome(failed, inputs.len()),
                Err(e) => return Err(CliError::output(e)),
            }
        }

        let summary = decoder.finish();
        if let Some(err) = &summary.error {
            failed += 1;
            match out.flush() {
                Ok(()) => {}
                Err(e) if is_broken_pipe(&e) => return outcome(failed, inputs.len()),
                Err(e) => return Err(CliError::output(e)),
            }
            eprintln!("{} {}: {}", "✗".red().bold(), summary.source, err);
        }
    }

    match out.flush() {
        Ok(()) => {}
        Err(e) if is_broken_pipe(&e) => {}
        Err(e) => return Err(CliError::output(e)),
    }

    outcome(failed, inputs.len())
}

/// The consumer went away.
fn is_broken_pipe(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

fn outcome(failed: usize, total: usize) -> Result<(), CliError> {
    if failed > 0 {
        return Err(CliError::Malformed { failed, total });
    }
    Ok(())
}

fn write_record<W: Write>(out: &mut W, record: &Record, raw: bool) -> io::Result<()> {
    if raw {
        serde_json::to_writer(&mut *out, &record.value)?;
    } else {
        let tagged = json!({
            "source": record.source(),
            "index": record.index,
            "offset": record.offset(),
            "value": record.value,
        });
        serde_json::to_writer(&mut *out, &tagged)?;
    }
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jstream_codec::Position;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    /// Writer whose reader has already gone away.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn input_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn paths(files: &[&NamedTempFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.path().to_string_lossy().into_owned())
            .collect()
    }

    fn record() -> Record {
        Record {
            source: Arc::from("a.json"),
            index: 2,
            position: Position {
                offset: 30,
                line: 3,
                column: 1,
            },
            value: json!({"id": 7}),
        }
    }

    #[test]
    fn test_write_tagged_record() {
        let mut out = Vec::new();
        write_record(&mut out, &record(), false).unwrap();

        let line = String::from_utf8(out).unwrap();
        assert!(line.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(
            parsed,
            json!({"source": "a.json", "index": 2, "offset": 30, "value": {"id": 7}})
        );
    }

    #[test]
    fn test_write_raw_record() {
        let mut out = Vec::new();
        write_record(&mut out, &record(), true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"id\":7}\n");
    }

    #[test]
    fn test_closed_output_still_reports_malformed_inputs() {
        let broken = input_file("]");
        let good = input_file("[1]");
        let inputs = paths(&[&broken, &good]);

        let result = decode_to(&mut ClosedPipe, &inputs, &DecoderConfig::default(), false, None);
        assert!(matches!(
            result,
            Err(CliError::Malformed {
                failed: 1,
                total: 2
            })
        ));
    }

    #[test]
    fn test_closed_output_without_failures_is_ok() {
        let good = input_file("[1] [2]");
        let inputs = paths(&[&good]);

        let result = decode_to(&mut ClosedPipe, &inputs, &DecoderConfig::default(), true, None);
        assert!(result.is_ok());
    }
}
