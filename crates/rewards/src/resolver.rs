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

//! Resolution of the reward paid to a delegate for an epoch.
//!
//! The chain grants epoch rewards in the last action of the last block of every epoch. The
//! receipt of that action carries one [RewardLog] per payout.

use alloy::primitives::U256;
use async_trait::async_trait;
use prost::Message;
use thiserror::Error;

use crate::{
    amount::{checked_add, parse_integer, AmountError},
    reward_log::{RewardLog, RewardType},
};

/// Default number of delegates producing blocks in an epoch.
pub const DEFAULT_NUM_DELEGATES: u64 = 24;
/// Default number of sub-epochs per epoch.
pub const DEFAULT_NUM_SUB_EPOCHS: u64 = 15;

/// Block production parameters that fix the epoch boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochSchedule {
    pub num_delegates: u64,
    pub num_sub_epochs: u64,
}

impl Default for EpochSchedule {
    fn default() -> Self {
        Self { num_delegates: DEFAULT_NUM_DELEGATES, num_sub_epochs: DEFAULT_NUM_SUB_EPOCHS }
    }
}

impl EpochSchedule {
    pub fn blocks_per_epoch(&self) -> u64 {
        self.num_delegates.saturating_mul(self.num_sub_epochs)
    }

    /// Height of the last block of `epoch`. Epochs are numbered from 1.
    pub fn last_block_of(&self, epoch: u64) -> Option<u64> {
        if epoch == 0 || self.blocks_per_epoch() == 0 {
            return None;
        }
        epoch.checked_mul(self.blocks_per_epoch())
    }
}

/// Summary of a block as returned by the chain API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockMeta {
    pub hash: String,
    pub height: u64,
    pub num_actions: u64,
}

/// An action inside a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionInfo {
    pub hash: String,
    /// Whether the action is a `GrantReward` action
    pub is_grant_reward: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReceiptLog {
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Receipt {
    pub logs: Vec<ReceiptLog>,
}

/// Read access to blocks, actions and receipts of the chain.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    /// Fetches the block at `height`, `None` when the chain has no such block.
    async fn block_meta_by_height(&self, height: u64) -> anyhow::Result<Option<BlockMeta>>;

    /// Fetches the action at `index` inside the block with hash `block_hash`.
    async fn action_in_block(
        &self,
        block_hash: &str,
        index: u64,
    ) -> anyhow::Result<Option<ActionInfo>>;

    /// Fetches the receipt of an action.
    async fn receipt_by_action(&self, action_hash: &str) -> anyhow::Result<Receipt>;
}

/// Maps an epoch to the gravity chain height its vote snapshot was taken at.
#[async_trait]
pub trait GravityHeightResolver: Send + Sync {
    async fn resolve_gravity_height(&self, epoch: u64) -> anyhow::Result<u64>;
}

#[derive(Debug, Error)]
pub enum RewardError {
    #[error("epoch {0} has no last block under the configured schedule")]
    InvalidEpoch(u64),
    #[error("failed to get last block {height} in epoch {epoch}")]
    MissingBlock { epoch: u64, height: u64 },
    #[error("last block {height} in epoch {epoch} has no actions")]
    EmptyBlock { epoch: u64, height: u64 },
    #[error("failed to get last action in epoch {epoch}")]
    MissingAction { epoch: u64 },
    #[error("epoch tail action {action} is not a reward grant (epoch {epoch})")]
    NotRewardGrant { epoch: u64, action: String },
    #[error("failed to decode reward log {index} of action {action}")]
    MalformedLog {
        action: String,
        index: usize,
        #[source]
        source: prost::DecodeError,
    },
    #[error("failed to parse reward amount {amount:?} of log {index}")]
    MalformedAmount {
        index: usize,
        amount: String,
        #[source]
        source: AmountError,
    },
    #[error("reward for {address} overflows")]
    Overflow { address: String },
    #[error(transparent)]
    Query(#[from] anyhow::Error),
}

/// Source of the reward credited to a reward address for an epoch.
#[async_trait]
pub trait EpochRewardSource: Send + Sync {
    async fn fetch_epoch_reward(
        &self,
        epoch: u64,
        reward_address: &str,
        with_foundation_bonus: bool,
    ) -> Result<U256, RewardError>;
}

/// Sums the rewards paid to `reward_address` in a grant-reward receipt.
///
/// Epoch rewards are always counted, foundation bonuses only when asked for, block rewards
/// never. Every log must decode and carry a well formed amount, even logs for other
/// addresses.
pub fn sum_reward_logs(
    action_hash: &str,
    logs: &[ReceiptLog],
    reward_address: &str,
    with_foundation_bonus: bool,
) -> Result<U256, RewardError> {
    let mut total = U256::ZERO;
    for (index, log) in logs.iter().enumerate() {
        let reward = RewardLog::decode(log.data.as_slice()).map_err(|source| {
            RewardError::MalformedLog { action: action_hash.to_string(), index, source }
        })?;
        let amount = parse_integer(&reward.amount).map_err(|source| {
            RewardError::MalformedAmount { index, amount: reward.amount.clone(), source }
        })?;
        if reward.addr != reward_address {
            continue;
        }
        let counted = match reward.kind() {
            Some(RewardType::EpochReward) => true,
            Some(RewardType::FoundationBonus) => with_foundation_bonus,
            Some(RewardType::BlockReward) | None => false,
        };
        if counted {
            tracing::trace!(
                "Counting {} Rau of {} to {}",
                reward.amount,
                reward.kind().map_or("unknown", |k| k.as_str()),
                reward_address
            );
            total = checked_add(total, amount)
                .map_err(|_| RewardError::Overflow { address: reward_address.to_string() })?;
        }
    }
    Ok(total)
}

/// Resolves epoch rewards by reading the grant-reward receipt at the end of each epoch.
#[derive(Clone, Debug)]
pub struct EpochRewardResolver<Q> {
    chain: Q,
    schedule: EpochSchedule,
}

impl<Q: ChainQuery> EpochRewardResolver<Q> {
    pub fn new(chain: Q, schedule: EpochSchedule) -> Self {
        Self { chain, schedule }
    }

    pub fn schedule(&self) -> &EpochSchedule {
        &self.schedule
    }

    pub fn chain(&self) -> &Q {
        &self.chain
    }
}

#[async_trait]
impl<Q: ChainQuery> EpochRewardSource for EpochRewardResolver<Q> {
    async fn fetch_epoch_reward(
        &self,
        epoch: u64,
        reward_address: &str,
        with_foundation_bonus: bool,
    ) -> Result<U256, RewardError> {
        let height = self.schedule.last_block_of(epoch).ok_or(RewardError::InvalidEpoch(epoch))?;
        tracing::debug!("Fetching last block {} of epoch {}", height, epoch);

        let block = self
            .chain
            .block_meta_by_height(height)
            .await?
            .ok_or(RewardError::MissingBlock { epoch, height })?;
        if block.num_actions == 0 {
            return Err(RewardError::EmptyBlock { epoch, height });
        }

        let action = self
            .chain
            .action_in_block(&block.hash, block.num_actions - 1)
            .await?
            .ok_or(RewardError::MissingAction { epoch })?;
        if !action.is_grant_reward {
            return Err(RewardError::NotRewardGrant { epoch, action: action.hash });
        }

        tracing::debug!("Fetching receipt of grant reward action {}", action.hash);
        let receipt = self.chain.receipt_by_action(&action.hash).await?;
        sum_reward_logs(&action.hash, &receipt.logs, reward_address, with_foundation_bonus)
    }
}
