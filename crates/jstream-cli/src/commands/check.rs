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

//! Check command - verify that inputs are clean JSON streams

use super::{open_input, values_label};
use crate::error::CliError;
use colored::Colorize;
use jstream_codec::{DecoderConfig, JsonStreamDecoder};
use tracing::debug;

/// Decode each input to the end and report whether it is well formed.
///
/// # Output
///
/// Prints one line per input to stdout:
///
/// ```text
/// ✓ good.json: 3 values
/// ✗ bad.json: 1 value before error: Syntax error at line 1, column 14: expected value
/// ```
///
/// # Errors
///
/// Returns `Err` if an input cannot be opened, or if any input contained
/// malformed JSON (after all inputs were checked).
pub fn check(inputs: &[String], config: &DecoderConfig) -> Result<(), CliError> {
    let mut failed = 0;

    for input in inputs {
        let (source, reader) = open_input(input)?;
        debug!(input = %source, "checking input");

        let mut decoder = JsonStreamDecoder::with_config(source, reader, config.clone());
        while decoder.advance() {}
        let summary = decoder.finish();

        match &summary.error {
            None => println!(
                "{} {}: {}",
                "✓".green().bold(),
                summary.source,
                values_label(summary.decoded)
            ),
            Some(err) => {
                failed += 1;
                println!(
                    "{} {}: {} before error: {}",
                    "✗".red().bold(),
                    summary.source,
                    values_label(summary.decoded),
                    err
                );
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Malformed {
            failed,
            total: inputs.len(),
        });
    }
    Ok(())
}
