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

//! CLI command implementations

mod check;
mod decode;

pub use check::check;
pub use decode::decode;

use crate::error::CliError;
use std::fs::File;
use std::io::{self, Read};

/// Input path that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Source identifier reported for standard input.
pub const STDIN_SOURCE: &str = "<stdin>";

/// Environment variable overriding the per-value size limit.
///
/// Used when `--max-value-bytes` is not given. `0` disables the limit.
pub const MAX_VALUE_BYTES_ENV: &str = "JSTREAM_MAX_VALUE_BYTES";

/// Get the per-value size limit from the environment.
///
/// Returns `None` if the variable is not set or does not hold a number.
pub fn max_value_bytes_from_env() -> Option<usize> {
    std::env::var(MAX_VALUE_BYTES_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
}

/// Open an input path, or standard input for `-`.
///
/// Returns the source identifier to tag decoded values with, and the reader.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be opened.
pub fn open_input(path: &str) -> Result<(String, Box<dyn Read>), CliError> {
    if path == STDIN_PATH {
        return Ok((STDIN_SOURCE.to_string(), Box::new(io::stdin().lock())));
    }
    let file = File::open(path).map_err(|e| CliError::io_error(path, e))?;
    Ok((path.to_string(), Box::new(file)))
}

/// "1 value", "2 values"
fn values_label(count: u64) -> String {
    if count == 1 {
        "1 value".to_string()
    } else {
        format!("{} values", count)
    }
}
