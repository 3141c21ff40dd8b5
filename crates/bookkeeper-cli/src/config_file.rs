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

//! The committee configuration file (`committee.yaml`).

use std::{fs, path::Path, time::Duration};

use anyhow::{ensure, Context, Result};
use bookkeeper_rewards::{
    resolver::{DEFAULT_NUM_DELEGATES, DEFAULT_NUM_SUB_EPOCHS},
    EpochSchedule,
};
use serde::Deserialize;
use url::Url;

use crate::committee_client::HttpCommittee;

/// Default path of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "committee.yaml";

const DEFAULT_COMMITTEE_TIMEOUT_SECS: u64 = 30;

/// Contents of the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct BookkeeperConfig {
    /// Election committee data source
    pub committee: CommitteeConfig,

    /// Epoch schedule of the chain, defaults to 24 delegates and 15 sub-epochs
    #[serde(default)]
    pub chain: Option<ChainConfig>,
}

/// Where to fetch election results from
#[derive(Debug, Clone, Deserialize)]
pub struct CommitteeConfig {
    /// Base URL of the election service
    pub url: Url,

    /// HTTP request timeout in seconds
    #[serde(default = "default_committee_timeout")]
    pub timeout_secs: u64,
}

fn default_committee_timeout() -> u64 {
    DEFAULT_COMMITTEE_TIMEOUT_SECS
}

/// Block production parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChainConfig {
    /// Delegates producing blocks in an epoch
    #[serde(default = "default_num_delegates")]
    pub num_delegates: u64,

    /// Sub-epochs per epoch
    #[serde(default = "default_num_sub_epochs")]
    pub num_sub_epochs: u64,
}

fn default_num_delegates() -> u64 {
    DEFAULT_NUM_DELEGATES
}

fn default_num_sub_epochs() -> u64 {
    DEFAULT_NUM_SUB_EPOCHS
}

impl BookkeeperConfig {
    /// Load and validate the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to load config file {}", path.display()))
    }

    /// Parse and validate a configuration from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("Failed to parse config")?;
        if let Some(chain) = &config.chain {
            ensure!(
                chain.num_delegates > 0 && chain.num_sub_epochs > 0,
                "chain.num_delegates and chain.num_sub_epochs must be positive"
            );
        }
        ensure!(config.committee.timeout_secs > 0, "committee.timeout_secs must be positive");
        Ok(config)
    }

    /// Epoch schedule used to locate the last block of each epoch
    pub fn schedule(&self) -> EpochSchedule {
        match self.chain {
            Some(chain) => EpochSchedule {
                num_delegates: chain.num_delegates,
                num_sub_epochs: chain.num_sub_epochs,
            },
            None => EpochSchedule::default(),
        }
    }

    /// Build a client for the configured election committee
    pub fn committee_client(&self) -> Result<HttpCommittee> {
        HttpCommittee::new(
            self.committee.url.clone(),
            Duration::from_secs(self.committee.timeout_secs),
        )
    }
}
