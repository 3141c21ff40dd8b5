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

use std::{collections::HashMap, time::Duration};

use alloy::primitives::{address, Address, U256};
use async_trait::async_trait;
use bookkeeper_rewards::{
    ActionInfo, BatchTransfer, BlockMeta, ChainQuery, Committee, Delegate, DelegateName,
    DistributionError, DistributionSettings, Distributor, ElectionResult, EpochRewardResolver,
    EpochRewardSource, EpochSchedule, GravityHeightResolver, LedgerCsv, Percentage, Receipt,
    ReceiptLog, RewardError, RewardLog, RewardType, Stage, TransferMethod, Vote,
};
use prost::Message;
use tracing_test::traced_test;

const ALICE: Address = address!("0x00000000000000000000000000000000000000a1");
const BOB: Address = address!("0x00000000000000000000000000000000000000b2");
const CAROL: Address = address!("0x00000000000000000000000000000000000000c3");
const REWARD_ADDRESS: &str = "io1robotreward";

fn delegate() -> DelegateName {
    DelegateName::encode("robotbp").unwrap()
}

fn gravity_height(epoch: u64) -> u64 {
    7_000_000 + epoch
}

/// Gravity height is a fixed offset of the epoch number.
struct OffsetGravity;

#[async_trait]
impl GravityHeightResolver for OffsetGravity {
    async fn resolve_gravity_height(&self, epoch: u64) -> anyhow::Result<u64> {
        Ok(gravity_height(epoch))
    }
}

#[derive(Default)]
struct FakeCommittee {
    results: HashMap<u64, ElectionResult>,
}

impl FakeCommittee {
    fn with_votes(mut self, epoch: u64, reward_address: &str, votes: &[(Address, u64)]) -> Self {
        let height = gravity_height(epoch);
        let votes = votes
            .iter()
            .map(|(voter, weight)| Vote {
                voter: *voter,
                candidate: delegate(),
                amount: U256::from(*weight),
                weighted_amount: U256::from(*weight),
                start_time: 1_560_000_000,
                duration_secs: 86_400 * 14,
                decay: false,
            })
            .collect();
        let delegates =
            vec![Delegate { name: delegate(), reward_address: reward_address.to_string() }];
        self.results.insert(height, ElectionResult { height, delegates, votes });
        self
    }
}

#[async_trait]
impl Committee for FakeCommittee {
    async fn fetch_result_by_height(&self, height: u64) -> anyhow::Result<ElectionResult> {
        self.results
            .get(&height)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no election result at height {height}"))
    }
}

#[derive(Default)]
struct FakeRewards {
    rewards: HashMap<u64, U256>,
}

impl FakeRewards {
    fn with_reward(mut self, epoch: u64, reward: u64) -> Self {
        self.rewards.insert(epoch, U256::from(reward));
        self
    }
}

#[async_trait]
impl EpochRewardSource for FakeRewards {
    async fn fetch_epoch_reward(
        &self,
        epoch: u64,
        reward_address: &str,
        _with_foundation_bonus: bool,
    ) -> Result<U256, RewardError> {
        assert_eq!(reward_address, REWARD_ADDRESS);
        self.rewards.get(&epoch).copied().ok_or(RewardError::MissingAction { epoch })
    }
}

/// Committee that never answers in time.
struct StalledCommittee;

#[async_trait]
impl Committee for StalledCommittee {
    async fn fetch_result_by_height(&self, _height: u64) -> anyhow::Result<ElectionResult> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(ElectionResult::default())
    }
}

fn settings(start: u64, to: u64, percentage: u64) -> DistributionSettings {
    DistributionSettings::new(delegate(), start, to, Percentage::from_whole(percentage)).unwrap()
}

#[tokio::test]
async fn test_full_reward_split_by_weight() {
    let committee =
        FakeCommittee::default().with_votes(1, REWARD_ADDRESS, &[(ALICE, 30), (BOB, 70)]);
    let rewards = FakeRewards::default().with_reward(1, 1000);
    let distributor = Distributor::new(&OffsetGravity, &committee, &rewards);

    let report = distributor.run(&settings(1, 1, 100)).await.unwrap();
    assert_eq!(report.ledger.get(&ALICE), Some(U256::from(300)));
    assert_eq!(report.ledger.get(&BOB), Some(U256::from(700)));
    assert_eq!(report.epochs.len(), 1);
    assert_eq!(report.epochs[0].gravity_height, gravity_height(1));
    assert_eq!(report.epochs[0].reward_address, REWARD_ADDRESS);
    assert_eq!(report.epochs[0].distributed, U256::from(1000));
}

#[tokio::test]
async fn test_half_reward() {
    let committee =
        FakeCommittee::default().with_votes(1, REWARD_ADDRESS, &[(ALICE, 30), (BOB, 70)]);
    let rewards = FakeRewards::default().with_reward(1, 1000);
    let distributor = Distributor::new(&OffsetGravity, &committee, &rewards);

    let report = distributor.run(&settings(1, 1, 50)).await.unwrap();
    assert_eq!(report.ledger.get(&ALICE), Some(U256::from(150)));
    assert_eq!(report.ledger.get(&BOB), Some(U256::from(350)));
}

#[tokio::test]
async fn test_dust_is_dropped() {
    let committee =
        FakeCommittee::default().with_votes(1, REWARD_ADDRESS, &[(ALICE, 1), (BOB, 2)]);
    let rewards = FakeRewards::default().with_reward(1, 10);
    let distributor = Distributor::new(&OffsetGravity, &committee, &rewards);

    let report = distributor.run(&settings(1, 1, 100)).await.unwrap();
    assert_eq!(report.ledger.get(&ALICE), Some(U256::from(3)));
    assert_eq!(report.ledger.get(&BOB), Some(U256::from(6)));
    assert_eq!(report.ledger.total().unwrap(), U256::from(9));
}

#[tokio::test]
#[traced_test]
async fn test_zero_reward_leaves_ledger_empty() {
    let committee =
        FakeCommittee::default().with_votes(1, REWARD_ADDRESS, &[(ALICE, 1), (BOB, 2)]);
    let rewards = FakeRewards::default().with_reward(1, 0);
    let distributor = Distributor::new(&OffsetGravity, &committee, &rewards);

    let report = distributor.run(&settings(1, 1, 100)).await.unwrap();
    assert!(report.ledger.is_empty());
    assert_eq!(report.epochs[0].distributed, U256::ZERO);
    assert!(logs_contain("Epoch 1 paid no reward to io1robotreward"));
}

#[tokio::test]
async fn test_rewards_accumulate_across_epochs() {
    let committee = FakeCommittee::default()
        .with_votes(5, REWARD_ADDRESS, &[(ALICE, 30), (BOB, 70)])
        .with_votes(6, REWARD_ADDRESS, &[(BOB, 1), (CAROL, 1)])
        .with_votes(7, "", &[(ALICE, 1)])
        .with_votes(8, REWARD_ADDRESS, &[]);
    let rewards = FakeRewards::default()
        .with_reward(5, 1000)
        .with_reward(6, 500)
        .with_reward(8, 400);
    let distributor = Distributor::new(&OffsetGravity, &committee, &rewards);

    let report = distributor.run(&settings(5, 8, 100)).await.unwrap();
    assert_eq!(report.ledger.get(&ALICE), Some(U256::from(300)));
    assert_eq!(report.ledger.get(&BOB), Some(U256::from(950)));
    assert_eq!(report.ledger.get(&CAROL), Some(U256::from(250)));
    let epochs: Vec<_> = report.epochs.iter().map(|e| e.epoch).collect();
    assert_eq!(epochs, vec![5, 6, 8]);
    assert_eq!(report.epochs[2].distributed, U256::ZERO);
}

#[tokio::test]
async fn test_epoch_order_does_not_matter() {
    let committee = FakeCommittee::default()
        .with_votes(1, REWARD_ADDRESS, &[(ALICE, 13), (BOB, 29)])
        .with_votes(2, REWARD_ADDRESS, &[(BOB, 7), (CAROL, 11)])
        .with_votes(3, REWARD_ADDRESS, &[(CAROL, 3), (ALICE, 5)]);
    let rewards =
        FakeRewards::default().with_reward(1, 12_345).with_reward(2, 999).with_reward(3, 77_777);
    let distributor = Distributor::new(&OffsetGravity, &committee, &rewards);

    let combined = distributor.run(&settings(1, 3, 85)).await.unwrap().ledger;
    let mut separate = distributor.run(&settings(3, 3, 85)).await.unwrap().ledger;
    for epoch in [2, 1] {
        let ledger = distributor.run(&settings(epoch, epoch, 85)).await.unwrap().ledger;
        for (owner, amount) in ledger.iter() {
            separate.credit(*owner, *amount).unwrap();
        }
    }
    assert_eq!(combined.sorted_entries(), separate.sorted_entries());

    // Shares never exceed the distributable reward.
    let distributable = U256::from(12_345u64 * 85 / 100 + 999 * 85 / 100 + 77_777 * 85 / 100);
    assert!(combined.total().unwrap() <= distributable);
}

#[tokio::test]
async fn test_collaborator_failure_names_epoch() {
    let committee = FakeCommittee::default().with_votes(1, REWARD_ADDRESS, &[(ALICE, 1)]);
    let rewards = FakeRewards::default().with_reward(1, 10);
    let distributor = Distributor::new(&OffsetGravity, &committee, &rewards);

    let err = distributor.run(&settings(1, 2, 100)).await.unwrap_err();
    assert_eq!(err.epoch(), Some(2));
    assert_eq!(err.stage(), Some(Stage::Committee));
    assert!(err.to_string().contains("epoch 2"));
}

#[tokio::test]
async fn test_reward_failure_aborts_run() {
    let committee = FakeCommittee::default()
        .with_votes(1, REWARD_ADDRESS, &[(ALICE, 1)])
        .with_votes(2, REWARD_ADDRESS, &[(ALICE, 1)]);
    let rewards = FakeRewards::default().with_reward(1, 10);
    let distributor = Distributor::new(&OffsetGravity, &committee, &rewards);

    let err = distributor.run(&settings(1, 2, 100)).await.unwrap_err();
    assert!(matches!(
        err,
        DistributionError::Reward { epoch: 2, source: RewardError::MissingAction { epoch: 2 } }
    ));
}

#[tokio::test]
async fn test_timeout_aborts_run() {
    let rewards = FakeRewards::default();
    let distributor = Distributor::new(&OffsetGravity, &StalledCommittee, &rewards);
    let settings = settings(3, 4, 100).with_call_timeout(Duration::from_millis(20));

    let err = distributor.run(&settings).await.unwrap_err();
    assert!(matches!(err, DistributionError::Timeout { epoch: 3, stage: Stage::Committee, .. }));
}

#[derive(Default)]
struct FakeChain {
    receipts: HashMap<u64, Vec<RewardLog>>,
}

#[async_trait]
impl ChainQuery for FakeChain {
    async fn block_meta_by_height(&self, height: u64) -> anyhow::Result<Option<BlockMeta>> {
        Ok(Some(BlockMeta { hash: format!("block-{height}"), height, num_actions: 2 }))
    }

    async fn action_in_block(
        &self,
        block_hash: &str,
        index: u64,
    ) -> anyhow::Result<Option<ActionInfo>> {
        assert_eq!(index, 1);
        Ok(Some(ActionInfo { hash: format!("{block_hash}-grant"), is_grant_reward: true }))
    }

    async fn receipt_by_action(&self, action_hash: &str) -> anyhow::Result<Receipt> {
        let height: u64 = action_hash
            .trim_start_matches("block-")
            .trim_end_matches("-grant")
            .parse()?;
        let logs = self
            .receipts
            .get(&height)
            .map(|logs| {
                logs.iter().map(|log| ReceiptLog { data: log.encode_to_vec() }).collect()
            })
            .unwrap_or_default();
        Ok(Receipt { logs })
    }
}

#[tokio::test]
async fn test_end_to_end_with_chain_receipts() {
    let schedule = EpochSchedule::default();
    let mut chain = FakeChain::default();
    chain.receipts.insert(
        schedule.last_block_of(1).unwrap(),
        vec![
            RewardLog::new(RewardType::BlockReward, REWARD_ADDRESS, "16"),
            RewardLog::new(RewardType::EpochReward, REWARD_ADDRESS, "900"),
            RewardLog::new(RewardType::FoundationBonus, REWARD_ADDRESS, "100"),
            RewardLog::new(RewardType::EpochReward, "io1someoneelse", "5000"),
        ],
    );
    let resolver = EpochRewardResolver::new(chain, schedule);
    let committee =
        FakeCommittee::default().with_votes(1, REWARD_ADDRESS, &[(ALICE, 30), (BOB, 70)]);
    let distributor = Distributor::new(&OffsetGravity, &committee, &resolver);

    let without_bonus = distributor.run(&settings(1, 1, 100)).await.unwrap();
    assert_eq!(without_bonus.epochs[0].total_reward, U256::from(900));
    assert_eq!(without_bonus.ledger.get(&BOB), Some(U256::from(630)));

    let with_bonus =
        distributor.run(&settings(1, 1, 100).with_foundation_bonus(true)).await.unwrap();
    assert_eq!(with_bonus.epochs[0].total_reward, U256::from(1000));
    assert_eq!(with_bonus.ledger.get(&ALICE), Some(U256::from(300)));
    assert_eq!(with_bonus.ledger.get(&BOB), Some(U256::from(700)));

    let mut csv = Vec::new();
    LedgerCsv::default().write(&with_bonus.ledger, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert_eq!(csv, format!("{},700\n{},300\n", BOB.to_checksum(None), ALICE.to_checksum(None)));

    let transfer = BatchTransfer::from_ledger(&with_bonus.ledger, "reward from robotbp");
    assert_eq!(transfer.recipients(), &[BOB, ALICE]);
    assert_eq!(transfer.total().unwrap(), U256::from(1000));
    assert!(!transfer.encode(TransferMethod::MultiSend).is_empty());
}
