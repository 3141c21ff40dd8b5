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

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use bookkeeper_rewards::{to_io_address, Committee, ElectionResult, GravityHeightResolver};
use clap::{ArgGroup, Args};

use crate::{
    chain_client::{IotexClient, DEFAULT_ENDPOINT},
    config::GlobalConfig,
    config_file::{BookkeeperConfig, DEFAULT_CONFIG_PATH},
};

/// Dump every vote of the election result at a height as CSV
#[derive(Args, Clone, Debug)]
#[clap(group(ArgGroup::new("target").required(true).args(["epoch", "height"])))]
pub struct BookkeeperDump {
    /// Path of the committee configuration file
    #[clap(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Epoch whose gravity chain start height is dumped
    #[clap(long)]
    pub epoch: Option<u64>,

    /// Gravity chain height to dump
    #[clap(long)]
    pub height: Option<u64>,

    /// Chain API endpoint (host:port), used with --epoch
    #[clap(long, short = 'e', default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Connect to the chain API without TLS
    #[clap(long)]
    pub plaintext: bool,
}

impl BookkeeperDump {
    /// Run the dump command
    pub async fn run(&self, global_config: &GlobalConfig) -> Result<()> {
        let config = BookkeeperConfig::load(&self.config)?;
        let timeout = global_config.call_timeout();

        let height = match (self.epoch, self.height) {
            (Some(epoch), _) => {
                let chain = IotexClient::connect(&self.endpoint, self.plaintext, timeout).await?;
                let height = tokio::time::timeout(timeout, chain.resolve_gravity_height(epoch))
                    .await
                    .with_context(|| format!("Timed out resolving gravity height of epoch {epoch}"))?
                    .with_context(|| format!("Failed to resolve gravity height of epoch {epoch}"))?;
                tracing::warn!(
                    "Using gravity chain start height {} read from the chain for epoch {}",
                    height,
                    epoch
                );
                height
            }
            (None, Some(height)) => height,
            (None, None) => anyhow::bail!("either --epoch or --height is required"),
        };

        let committee = config.committee_client()?;
        let result = tokio::time::timeout(timeout, committee.fetch_result_by_height(height))
            .await
            .with_context(|| format!("Timed out fetching election result at height {height}"))?
            .with_context(|| format!("Failed to fetch election result at height {height}"))?;

        write_votes(&result, io::stdout().lock())
    }
}

/// Write every vote of `result` as CSV, grouped by delegate in committee order
pub fn write_votes<W: io::Write>(result: &ElectionResult, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "voter",
        "startTime",
        "duration",
        "decay",
        "tokens",
        "votes",
        "votee",
        "voterIoAddr",
    ])?;
    for delegate in &result.delegates {
        for vote in result.votes_by_delegate(&delegate.name) {
            csv.write_record([
                hex::encode(vote.voter),
                vote.start_time.to_string(),
                vote.duration_secs.to_string(),
                vote.decay.to_string(),
                vote.amount.to_string(),
                vote.weighted_amount.to_string(),
                vote.candidate.to_string(),
                to_io_address(vote.voter)?,
            ])?;
        }
    }
    csv.flush()?;
    Ok(())
}
