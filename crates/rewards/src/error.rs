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

use std::{fmt, time::Duration};

use thiserror::Error;

pub use crate::{
    address::AddressError, amount::AmountError, delegate::NameError, resolver::RewardError,
    snapshot::SnapshotError,
};

/// Step of the per-epoch pipeline an error happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    GravityHeight,
    Committee,
    Snapshot,
    Reward,
    Accumulate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::GravityHeight => "resolving gravity chain height",
            Stage::Committee => "fetching election result",
            Stage::Snapshot => "extracting vote snapshot",
            Stage::Reward => "fetching epoch reward",
            Stage::Accumulate => "accumulating distribution",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("invalid epoch range from {start} to {to}")]
    InvalidEpochRange { start: u64, to: u64 },
    #[error("distribution percentage must be positive")]
    ZeroPercentage,
    #[error("epoch {epoch}: timed out after {timeout:?} while {stage}")]
    Timeout { epoch: u64, stage: Stage, timeout: Duration },
    #[error("epoch {epoch}: failed while {stage}")]
    Collaborator {
        epoch: u64,
        stage: Stage,
        #[source]
        source: anyhow::Error,
    },
    #[error("epoch {epoch}: failed while {}", Stage::Reward)]
    Reward {
        epoch: u64,
        #[source]
        source: RewardError,
    },
    #[error("epoch {epoch}: failed while {}", Stage::Snapshot)]
    Snapshot {
        epoch: u64,
        #[source]
        source: SnapshotError,
    },
    #[error("epoch {epoch}: failed while {}", Stage::Accumulate)]
    Amount {
        epoch: u64,
        #[source]
        source: AmountError,
    },
}

impl DistributionError {
    /// Epoch the run aborted at, `None` for settings errors.
    pub fn epoch(&self) -> Option<u64> {
        match self {
            DistributionError::InvalidEpochRange { .. } | DistributionError::ZeroPercentage => None,
            DistributionError::Timeout { epoch, .. }
            | DistributionError::Collaborator { epoch, .. }
            | DistributionError::Reward { epoch, .. }
            | DistributionError::Snapshot { epoch, .. }
            | DistributionError::Amount { epoch, .. } => Some(*epoch),
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            DistributionError::InvalidEpochRange { .. } | DistributionError::ZeroPercentage => None,
            DistributionError::Timeout { stage, .. }
            | DistributionError::Collaborator { stage, .. } => Some(*stage),
            DistributionError::Reward { .. } => Some(Stage::Reward),
            DistributionError::Snapshot { .. } => Some(Stage::Snapshot),
            DistributionError::Amount { .. } => Some(Stage::Accumulate),
        }
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error("{recipients} recipients but {amounts} amounts")]
    LengthMismatch { recipients: usize, amounts: usize },
    #[error("no transfers in input")]
    EmptyInput,
    #[error("line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("invalid amount unit {0:?}, expected Rau or IOTX")]
    InvalidUnit(String),
    #[error("invalid transfer method {0:?}, expected multi-send or send-coin")]
    InvalidMethod(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
