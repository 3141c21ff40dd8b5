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

//! Election results and per-delegate vote snapshots.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use thiserror::Error;

use crate::{
    amount::{checked_add, AmountError},
    delegate::DelegateName,
};

/// A delegate registered with the election committee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delegate {
    /// Fixed-width delegate name
    pub name: DelegateName,
    /// Address the chain pays epoch rewards to. Empty when the delegate has not set one.
    pub reward_address: String,
}

/// A single vote bucket as reported by the committee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vote {
    /// Owner of the bucket
    pub voter: Address,
    /// Delegate the bucket votes for
    pub candidate: DelegateName,
    /// Staked token amount
    pub amount: U256,
    /// Amount after the committee's duration and decay weighting
    pub weighted_amount: U256,
    /// Stake start, unix seconds
    pub start_time: u64,
    /// Stake duration in seconds
    pub duration_secs: u64,
    /// Whether the stake decays over time
    pub decay: bool,
}

/// Delegates and votes at one gravity chain height.
#[derive(Clone, Debug, Default)]
pub struct ElectionResult {
    /// Gravity chain height of the snapshot
    pub height: u64,
    /// Registered delegates
    pub delegates: Vec<Delegate>,
    /// All votes, in committee order
    pub votes: Vec<Vote>,
}

impl ElectionResult {
    /// Looks up a delegate by name.
    pub fn delegate(&self, name: &DelegateName) -> Option<&Delegate> {
        self.delegates.iter().find(|d| d.name == *name)
    }

    /// Votes cast for the given delegate, in committee order.
    pub fn votes_by_delegate<'a>(
        &'a self,
        name: &'a DelegateName,
    ) -> impl Iterator<Item = &'a Vote> + 'a {
        self.votes.iter().filter(move |v| v.candidate == *name)
    }
}

/// Source of election results, usually a remote election service.
#[async_trait]
pub trait Committee: Send + Sync {
    /// Fetches the election result at the given gravity chain height.
    async fn fetch_result_by_height(&self, height: u64) -> anyhow::Result<ElectionResult>;
}

/// Weighted stake credited to a delegate by one voter in one epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteBucket {
    pub owner: Address,
    pub amount: U256,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("total weight {declared} does not match the sum of bucket amounts {summed}")]
    WeightMismatch { declared: U256, summed: U256 },
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Read-only view of one delegate's weighted votes at one height.
///
/// `total_weight` always equals the sum of the bucket amounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteSnapshot {
    reward_address: String,
    total_weight: U256,
    buckets: Vec<VoteBucket>,
}

fn sum_buckets(buckets: &[VoteBucket]) -> Result<U256, AmountError> {
    buckets.iter().try_fold(U256::ZERO, |acc, b| checked_add(acc, b.amount))
}

impl VoteSnapshot {
    /// Builds a snapshot, computing the total weight from the buckets.
    pub fn new(
        reward_address: impl Into<String>,
        buckets: Vec<VoteBucket>,
    ) -> Result<Self, SnapshotError> {
        let total_weight = sum_buckets(&buckets)?;
        Ok(Self { reward_address: reward_address.into(), total_weight, buckets })
    }

    /// Builds a snapshot with a declared total weight, checking it against the buckets.
    pub fn with_total_weight(
        reward_address: impl Into<String>,
        total_weight: U256,
        buckets: Vec<VoteBucket>,
    ) -> Result<Self, SnapshotError> {
        let summed = sum_buckets(&buckets)?;
        if summed != total_weight {
            return Err(SnapshotError::WeightMismatch { declared: total_weight, summed });
        }
        Ok(Self { reward_address: reward_address.into(), total_weight, buckets })
    }

    /// Extracts the snapshot for `delegate` from an election result.
    ///
    /// Returns `None` when the delegate is not registered or has no reward address.
    pub fn from_result(
        result: &ElectionResult,
        delegate: &DelegateName,
    ) -> Result<Option<Self>, SnapshotError> {
        let Some(entry) = result.delegate(delegate) else {
            return Ok(None);
        };
        if entry.reward_address.is_empty() {
            return Ok(None);
        }
        let buckets = result
            .votes_by_delegate(delegate)
            .map(|v| VoteBucket { owner: v.voter, amount: v.weighted_amount })
            .collect();
        Self::new(entry.reward_address.clone(), buckets).map(Some)
    }

    pub fn reward_address(&self) -> &str {
        &self.reward_address
    }

    pub fn total_weight(&self) -> U256 {
        self.total_weight
    }

    pub fn buckets(&self) -> &[VoteBucket] {
        &self.buckets
    }

    pub fn into_buckets(self) -> Vec<VoteBucket> {
        self.buckets
    }
}
