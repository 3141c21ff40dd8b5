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

//! Proportional accumulation of epoch rewards into a per-voter ledger.

use std::collections::HashMap;

use alloy::primitives::{Address, U256};

use crate::{
    amount::{checked_add, mul_div_floor, AmountError, Percentage},
    snapshot::{SnapshotError, VoteBucket, VoteSnapshot},
};

/// Everything needed to split one epoch's reward among voters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpochRewardRecord {
    pub epoch: u64,
    pub reward_address: String,
    pub total_reward: U256,
    pub total_weight: U256,
    pub buckets: Vec<VoteBucket>,
}

impl EpochRewardRecord {
    /// Builds a record from a vote snapshot and the reward resolved for its reward address.
    pub fn new(epoch: u64, total_reward: U256, snapshot: VoteSnapshot) -> Self {
        Self {
            epoch,
            reward_address: snapshot.reward_address().to_string(),
            total_reward,
            total_weight: snapshot.total_weight(),
            buckets: snapshot.into_buckets(),
        }
    }

    /// Checks that `total_weight` is the sum of the bucket amounts.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        VoteSnapshot::with_total_weight(
            self.reward_address.as_str(),
            self.total_weight,
            self.buckets.clone(),
        )
        .map(|_| ())
    }
}

/// Cumulative reward per voter across a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistributionLedger {
    entries: HashMap<Address, U256>,
}

impl DistributionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the balance of `owner`, creating the entry at zero first.
    pub fn credit(&mut self, owner: Address, amount: U256) -> Result<(), AmountError> {
        let balance = self.entries.entry(owner).or_insert(U256::ZERO);
        *balance = checked_add(*balance, amount)?;
        Ok(())
    }

    /// Folds one epoch into the ledger and returns the amount credited.
    ///
    /// The distributable reward is `floor(total_reward * percentage / 100)`. Each bucket gets
    /// `floor(amount * distributable / total_weight)`, so the credited sum can fall short of
    /// the distributable reward; that dust is dropped. Epochs without reward or without
    /// weight leave the ledger untouched.
    pub fn accumulate(
        &mut self,
        record: &EpochRewardRecord,
        percentage: Percentage,
    ) -> Result<U256, AmountError> {
        if record.total_reward.is_zero() || record.total_weight.is_zero() {
            return Ok(U256::ZERO);
        }
        let distributable = percentage.apply(record.total_reward)?;

        let mut credited = U256::ZERO;
        for bucket in &record.buckets {
            let share = mul_div_floor(bucket.amount, distributable, record.total_weight)?;
            self.credit(bucket.owner, share)?;
            credited = checked_add(credited, share)?;
        }
        Ok(credited)
    }

    pub fn get(&self, owner: &Address) -> Option<U256> {
        self.entries.get(owner).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances.
    pub fn total(&self) -> Result<U256, AmountError> {
        self.entries.values().try_fold(U256::ZERO, |acc, v| checked_add(acc, *v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.entries.iter()
    }

    /// Entries ordered by descending balance; equal balances are ordered by ascending
    /// address.
    pub fn sorted_entries(&self) -> Vec<(Address, U256)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(a, v)| (*a, *v)).collect();
        entries.sort_by(|(addr_a, a), (addr_b, b)| b.cmp(a).then_with(|| addr_a.cmp(addr_b)));
        entries
    }
}
