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

//! Proportional distribution of delegate epoch rewards to the voters backing the delegate.
//!
//! A [Distributor] walks a range of epochs. For each epoch it resolves the gravity chain
//! height of the vote snapshot, fetches the [ElectionResult] at that height, extracts the
//! delegate's [VoteSnapshot], resolves the reward paid to the delegate's reward address and
//! folds the voters' shares into a [DistributionLedger]. The ledger can then be rendered as a
//! CSV with [LedgerCsv] or as batch-transfer call data with [BatchTransfer].

pub mod address;
pub mod amount;
pub mod delegate;
pub mod distributor;
pub mod encoder;
pub mod error;
pub mod ledger;
pub mod resolver;
pub mod reward_log;
pub mod snapshot;

pub use address::{from_io_address, parse_address, to_io_address};
pub use amount::{Percentage, ONE_IOTX, RAU_DECIMALS};
pub use delegate::DelegateName;
pub use distributor::{
    DistributionReport, DistributionSettings, Distributor, EpochSummary, DEFAULT_CALL_TIMEOUT,
    LONG_RANGE_EPOCHS,
};
pub use encoder::{
    output_file_name, read_transfer_csv, AddressFormat, BatchTransfer, LedgerCsv, OutputUnit,
    TransferMethod,
};
pub use error::{DistributionError, EncodeError, Stage};
pub use ledger::{DistributionLedger, EpochRewardRecord};
pub use resolver::{
    ActionInfo, BlockMeta, ChainQuery, EpochRewardResolver, EpochRewardSource, EpochSchedule,
    GravityHeightResolver, Receipt, ReceiptLog, RewardError,
};
pub use reward_log::{RewardLog, RewardType};
pub use snapshot::{Committee, Delegate, ElectionResult, Vote, VoteBucket, VoteSnapshot};
