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

//! Multi-epoch distribution runs.

use std::{future::Future, time::Duration};

use alloy::primitives::U256;

use crate::{
    amount::Percentage,
    delegate::DelegateName,
    error::{DistributionError, Stage},
    ledger::{DistributionLedger, EpochRewardRecord},
    resolver::{EpochRewardSource, GravityHeightResolver},
    snapshot::{Committee, VoteSnapshot},
};

/// Default time allowed for a single collaborator call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Ranges of at least this many epochs take long enough to deserve a warning.
pub const LONG_RANGE_EPOCHS: u64 = 24;

/// Parameters of a distribution run, validated on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionSettings {
    delegate: DelegateName,
    start: u64,
    to: u64,
    percentage: Percentage,
    with_foundation_bonus: bool,
    call_timeout: Duration,
}

impl DistributionSettings {
    pub fn new(
        delegate: DelegateName,
        start: u64,
        to: u64,
        percentage: Percentage,
    ) -> Result<Self, DistributionError> {
        if start == 0 || to == 0 || start > to {
            return Err(DistributionError::InvalidEpochRange { start, to });
        }
        if percentage.is_zero() {
            return Err(DistributionError::ZeroPercentage);
        }
        Ok(Self {
            delegate,
            start,
            to,
            percentage,
            with_foundation_bonus: false,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        })
    }

    pub fn with_foundation_bonus(self, with_foundation_bonus: bool) -> Self {
        Self { with_foundation_bonus, ..self }
    }

    pub fn with_call_timeout(self, call_timeout: Duration) -> Self {
        Self { call_timeout, ..self }
    }

    pub fn delegate(&self) -> &DelegateName {
        &self.delegate
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn to(&self) -> u64 {
        self.to
    }

    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    pub fn includes_foundation_bonus(&self) -> bool {
        self.with_foundation_bonus
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// Number of epochs in the range, both ends included.
    pub fn epoch_count(&self) -> u64 {
        self.to - self.start + 1
    }

    pub fn is_long_range(&self) -> bool {
        self.to - self.start >= LONG_RANGE_EPOCHS
    }
}

/// What happened to one epoch of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpochSummary {
    pub epoch: u64,
    pub gravity_height: u64,
    pub reward_address: String,
    /// Reward resolved for the reward address, before the percentage is applied
    pub total_reward: U256,
    /// Amount credited to voters
    pub distributed: U256,
}

/// Result of a completed run.
#[derive(Clone, Debug, Default)]
pub struct DistributionReport {
    pub ledger: DistributionLedger,
    /// Summaries of the epochs that contributed, in epoch order
    pub epochs: Vec<EpochSummary>,
}

/// Drives the epoch loop over the three collaborators.
pub struct Distributor<'a> {
    gravity: &'a dyn GravityHeightResolver,
    committee: &'a dyn Committee,
    rewards: &'a dyn EpochRewardSource,
}

impl<'a> Distributor<'a> {
    pub fn new(
        gravity: &'a dyn GravityHeightResolver,
        committee: &'a dyn Committee,
        rewards: &'a dyn EpochRewardSource,
    ) -> Self {
        Self { gravity, committee, rewards }
    }

    /// Accumulates every epoch of the range into a fresh ledger.
    ///
    /// Any collaborator failure or timeout aborts the run. Epochs in which the delegate has
    /// no reward address are skipped.
    pub async fn run(
        &self,
        settings: &DistributionSettings,
    ) -> Result<DistributionReport, DistributionError> {
        tracing::info!(
            "Computing distribution for {} ({}) from epoch {} to epoch {}",
            settings.delegate,
            settings.delegate.to_hex(),
            settings.start,
            settings.to
        );

        let mut report = DistributionReport::default();
        for epoch in settings.start..=settings.to {
            if let Some(summary) = self.process_epoch(settings, epoch, &mut report.ledger).await? {
                report.epochs.push(summary);
            }
        }

        tracing::info!(
            "Distribution covers {} voters over {} rewarded epochs",
            report.ledger.len(),
            report.epochs.len()
        );
        Ok(report)
    }

    async fn process_epoch(
        &self,
        settings: &DistributionSettings,
        epoch: u64,
        ledger: &mut DistributionLedger,
    ) -> Result<Option<EpochSummary>, DistributionError> {
        let timeout = settings.call_timeout;

        let gravity_height = with_timeout(
            epoch,
            Stage::GravityHeight,
            timeout,
            self.gravity.resolve_gravity_height(epoch),
        )
        .await?
        .map_err(|source| DistributionError::Collaborator {
            epoch,
            stage: Stage::GravityHeight,
            source,
        })?;
        tracing::debug!("Epoch {} maps to gravity chain height {}", epoch, gravity_height);

        let result = with_timeout(
            epoch,
            Stage::Committee,
            timeout,
            self.committee.fetch_result_by_height(gravity_height),
        )
        .await?
        .map_err(|source| DistributionError::Collaborator {
            epoch,
            stage: Stage::Committee,
            source,
        })?;

        let snapshot = VoteSnapshot::from_result(&result, &settings.delegate)
            .map_err(|source| DistributionError::Snapshot { epoch, source })?;
        let Some(snapshot) = snapshot else {
            tracing::warn!(
                "Skipping epoch {}: {} has no reward address at gravity height {}",
                epoch,
                settings.delegate,
                gravity_height
            );
            return Ok(None);
        };

        let total_reward = with_timeout(
            epoch,
            Stage::Reward,
            timeout,
            self.rewards.fetch_epoch_reward(
                epoch,
                snapshot.reward_address(),
                settings.with_foundation_bonus,
            ),
        )
        .await?
        .map_err(|source| DistributionError::Reward { epoch, source })?;

        let record = EpochRewardRecord::new(epoch, total_reward, snapshot);
        record.validate().map_err(|source| DistributionError::Snapshot { epoch, source })?;
        if record.total_reward.is_zero() {
            tracing::warn!("Epoch {} paid no reward to {}", epoch, record.reward_address);
        } else if record.total_weight.is_zero() {
            tracing::warn!("Epoch {} has no votes for {}", epoch, settings.delegate);
        }
        let distributed = ledger
            .accumulate(&record, settings.percentage)
            .map_err(|source| DistributionError::Amount { epoch, source })?;

        tracing::info!(
            "Epoch {}: gravity height {}, reward address {}, reward {} Rau, distributed {} Rau",
            epoch,
            gravity_height,
            record.reward_address,
            record.total_reward,
            distributed
        );
        Ok(Some(EpochSummary {
            epoch,
            gravity_height,
            reward_address: record.reward_address,
            total_reward: record.total_reward,
            distributed,
        }))
    }
}

async fn with_timeout<F: Future>(
    epoch: u64,
    stage: Stage,
    timeout: Duration,
    fut: F,
) -> Result<F::Output, DistributionError> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| DistributionError::Timeout { epoch, stage, timeout })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name() -> DelegateName {
        DelegateName::encode("robotbp").unwrap()
    }

    #[test]
    fn test_settings_validation() {
        assert!(matches!(
            DistributionSettings::new(name(), 0, 5, Percentage::FULL),
            Err(DistributionError::InvalidEpochRange { start: 0, to: 5 })
        ));
        assert!(matches!(
            DistributionSettings::new(name(), 5, 0, Percentage::FULL),
            Err(DistributionError::InvalidEpochRange { .. })
        ));
        assert!(matches!(
            DistributionSettings::new(name(), 6, 5, Percentage::FULL),
            Err(DistributionError::InvalidEpochRange { start: 6, to: 5 })
        ));
        assert!(matches!(
            DistributionSettings::new(name(), 1, 5, Percentage::from_whole(0)),
            Err(DistributionError::ZeroPercentage)
        ));

        let settings = DistributionSettings::new(name(), 5, 5, Percentage::from_whole(90))
            .unwrap()
            .with_foundation_bonus(true)
            .with_call_timeout(Duration::from_secs(3));
        assert_eq!(settings.epoch_count(), 1);
        assert!(settings.includes_foundation_bonus());
        assert_eq!(settings.call_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_long_range() {
        let short = DistributionSettings::new(name(), 1, 24, Percentage::FULL).unwrap();
        assert!(!short.is_long_range());
        let long = DistributionSettings::new(name(), 1, 25, Percentage::FULL).unwrap();
        assert!(long.is_long_range());
    }

    #[tokio::test]
    async fn test_with_timeout_reports_stage() {
        let err = with_timeout(
            7,
            Stage::Committee,
            Duration::from_millis(10),
            tokio::time::sleep(Duration::from_secs(5)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.epoch(), Some(7));
        assert_eq!(err.stage(), Some(Stage::Committee));
        assert!(err.to_string().contains("fetching election result"));
    }
}
