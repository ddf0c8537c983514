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

//! JStream CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **decode**: Print every value of one or more JSON streams, one per line,
//!   tagged with source, index and byte offset (or bare with `--raw`)
//! - **check**: Report how many values each input holds, or where it breaks
//!
//! Every input is decoded independently. A malformed value ends its own input
//! only; the remaining inputs are still processed and the command fails at
//! the end.
//!
//! # Examples
//!
//! ```no_run
//! use jstream_cli::commands::check;
//! use jstream_codec::DecoderConfig;
//!
//! # fn main() -> Result<(), jstream_cli::error::CliError> {
//! check(&["events.json".to_string()], &DecoderConfig::default())?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
