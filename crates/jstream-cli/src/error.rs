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

//! Structured error types for the JStream CLI.
//!
//! All CLI operations return `Result<T, CliError>` for consistent error reporting.
//! Decode errors inside an input are reported per input while processing
//! continues; [`CliError::Malformed`] only summarizes them at the end.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for JStream CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use jstream_cli::error::CliError;
///
/// fn open(path: &str) -> Result<std::fs::File, CliError> {
///     std::fs::File::open(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Opening an input failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The input path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Writing results to stdout failed.
    #[error("Failed to write output: {message}")]
    Output {
        /// The error message
        message: String,
    },

    /// One or more inputs contained malformed JSON.
    #[error("{failed} of {total} input(s) contained malformed JSON")]
    Malformed {
        /// Number of inputs whose decoder latched an error
        failed: usize,
        /// Number of inputs processed
        total: usize,
    },

    /// Invalid arguments or environment.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an output error.
    pub fn output(source: io::Error) -> Self {
        Self::Output {
            message: source.to_string(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
