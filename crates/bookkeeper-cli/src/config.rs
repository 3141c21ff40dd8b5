// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Options shared by every command.

use std::time::Duration;

use bookkeeper_rewards::DEFAULT_CALL_TIMEOUT;
use clap::Args;
use tracing::level_filters::LevelFilter;

/// Common configuration options for all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalConfig {
    /// Timeout in seconds for each call to the chain API or the election committee.
    #[clap(long = "timeout", env = "CALL_TIMEOUT", global = true, value_parser = parse_timeout)]
    pub call_timeout: Option<Duration>,

    /// Log level (error, warn, info, debug, trace)
    #[clap(long, env = "LOG_LEVEL", global = true, default_value = "warn")]
    pub log_level: LevelFilter,
}

fn parse_timeout(arg: &str) -> Result<Duration, String> {
    let secs: u64 = arg.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
    if secs == 0 {
        return Err("timeout must be at least one second".to_string());
    }
    Ok(Duration::from_secs(secs))
}

impl GlobalConfig {
    /// Timeout applied to each collaborator call.
    pub fn call_timeout(&self) -> Duration {
        self.call_timeout.unwrap_or(DEFAULT_CALL_TIMEOUT)
    }
}
