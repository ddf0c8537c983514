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

//! CLI command definitions and argument parsing.

mod decoder_args;

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

pub use decoder_args::DecoderArgs;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use jstream_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode JSON streams and print one value per line
    ///
    /// Reads each input as a sequence of concatenated JSON values and writes
    /// them to stdout as compact JSON, tagged with their source, index and
    /// byte offset unless --raw is given.
    Decode {
        /// Input files ("-" for stdin)
        #[arg(value_name = "INPUT", default_value = "-")]
        inputs: Vec<String>,

        /// Print bare values without source tags
        #[arg(short, long)]
        raw: bool,

        /// Stop after N values per input
        #[arg(short = 'n', long, value_name = "N")]
        limit: Option<u64>,

        #[command(flatten)]
        decoder: DecoderArgs,
    },

    /// Check that inputs are well-formed JSON streams
    ///
    /// Decodes every input to the end and prints how many values it holds,
    /// or where the first malformed value starts.
    Check {
        /// Input files ("-" for stdin)
        #[arg(value_name = "INPUT", default_value = "-")]
        inputs: Vec<String>,

        #[command(flatten)]
        decoder: DecoderArgs,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the decoder options are invalid, an input cannot be
    /// opened, output cannot be written, or any input is malformed.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Decode {
                inputs,
                raw,
                limit,
                decoder,
            } => commands::decode(&inputs, &decoder.to_config()?, raw, limit),
            Commands::Check { inputs, decoder } => {
                commands::check(&inputs, &decoder.to_config()?)
            }
        }
    }
}
