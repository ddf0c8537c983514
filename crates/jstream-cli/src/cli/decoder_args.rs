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

//! Decoder options shared by all commands.

use crate::commands::max_value_bytes_from_env;
use crate::error::CliError;
use clap::Args;
use jstream_codec::{DecoderConfig, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_DEPTH};

/// Limits and buffering for the stream decoder.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DecoderArgs {
    /// Maximum bytes in a single value, 0 for no limit
    /// [default: 10485760, or JSTREAM_MAX_VALUE_BYTES]
    #[arg(long, value_name = "BYTES")]
    pub max_value_bytes: Option<usize>,

    /// Maximum nesting depth of objects and arrays
    #[arg(long, value_name = "DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Read buffer size in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_BUFFER_SIZE)]
    pub buffer_size: usize,
}

impl DecoderArgs {
    /// Build the decoder configuration.
    ///
    /// Without `--max-value-bytes` the limit comes from
    /// `JSTREAM_MAX_VALUE_BYTES`, then from the library default.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidInput`] if the depth or buffer size is zero.
    pub fn to_config(&self) -> Result<DecoderConfig, CliError> {
        if self.max_depth == 0 {
            return Err(CliError::invalid_input("--max-depth must be at least 1"));
        }
        if self.buffer_size == 0 {
            return Err(CliError::invalid_input("--buffer-size must be at least 1"));
        }

        let builder = DecoderConfig::builder()
            .max_depth(self.max_depth)
            .buffer_size(self.buffer_size);

        let builder = match self.max_value_bytes.or_else(max_value_bytes_from_env) {
            Some(0) => builder.unlimited_value_size(),
            Some(limit) => builder.max_value_bytes(limit),
            None => builder,
        };

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(max_value_bytes: Option<usize>) -> DecoderArgs {
        DecoderArgs {
            max_value_bytes,
            max_depth: 16,
            buffer_size: 4096,
        }
    }

    #[test]
    fn test_explicit_limits() {
        let config = args(Some(2048)).to_config().unwrap();
        assert_eq!(config.max_value_bytes, Some(2048));
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.buffer_size, 4096);
    }

    #[test]
    fn test_zero_disables_value_limit() {
        let config = args(Some(0)).to_config().unwrap();
        assert_eq!(config.max_value_bytes, None);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let mut args = args(Some(1));
        args.max_depth = 0;
        assert!(matches!(args.to_config(), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let mut args = args(Some(1));
        args.buffer_size = 0;
        let err = args.to_config().unwrap_err();
        assert!(err.to_string().contains("--buffer-size"));
    }
}
