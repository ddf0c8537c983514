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

//! JStream Command Line Interface

use clap::Parser;
use jstream_cli::cli::Commands;
use jstream_cli::error::CliError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log filter used when neither --log-level nor RUST_LOG is set.
const DEFAULT_LOG_FILTER: &str = "jstream_codec=warn,jstream_cli=warn";

/// JStream - decode and check streams of concatenated JSON values
///
/// # Examples
///
/// ```bash
/// # Tag every value of a log file with its source and offset
/// jstream decode app.log
///
/// # Bare values from stdin, first 10 only
/// cat events.json | jstream decode --raw -n 10
///
/// # Verify several files
/// jstream check a.json b.json
/// ```
#[derive(Parser)]
#[command(name = "jstream")]
#[command(author, version, about = "JStream - decode and check streams of concatenated JSON values", long_about = None)]
struct Cli {
    /// Log filter directives, e.g. "debug" or "jstream_codec=trace" (overrides RUST_LOG)
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(level: Option<&str>) -> Result<(), CliError> {
    let filter = match level {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| CliError::invalid_input(format!("invalid --log-level: {}", e)))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = init_logging(cli.log_level.as_deref()).and_then(|()| cli.command.execute());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
