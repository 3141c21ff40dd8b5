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

//! Wire format of the reward records carried in grant-reward receipt logs.

/// A reward payout recorded by the rewarding protocol (`rewardingpb.RewardLog`).
#[derive(Clone, PartialEq, prost::Message)]
pub struct RewardLog {
    #[prost(enumeration = "RewardType", tag = "1")]
    pub r#type: i32,
    /// Native address of the recipient
    #[prost(string, tag = "2")]
    pub addr: String,
    /// Base-10 amount in Rau
    #[prost(string, tag = "3")]
    pub amount: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum RewardType {
    BlockReward = 0,
    EpochReward = 1,
    FoundationBonus = 2,
}

impl RewardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardType::BlockReward => "block reward",
            RewardType::EpochReward => "epoch reward",
            RewardType::FoundationBonus => "foundation bonus",
        }
    }
}

impl RewardLog {
    pub fn new(kind: RewardType, addr: impl Into<String>, amount: impl Into<String>) -> Self {
        Self { r#type: kind as i32, addr: addr.into(), amount: amount.into() }
    }

    /// Decoded reward type, `None` for values this version does not know.
    pub fn kind(&self) -> Option<RewardType> {
        RewardType::try_from(self.r#type).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_decode_known_bytes() {
        // type = EPOCH_REWARD, addr = "io1a", amount = "12"
        let bytes = [0x08, 0x01, 0x12, 0x04, b'i', b'o', b'1', b'a', 0x1a, 0x02, b'1', b'2'];
        let log = RewardLog::decode(&bytes[..]).unwrap();
        assert_eq!(log.kind(), Some(RewardType::EpochReward));
        assert_eq!(log.addr, "io1a");
        assert_eq!(log.amount, "12");
        assert_eq!(log.encode_to_vec(), bytes);
    }

    #[test]
    fn test_unknown_type() {
        let log = RewardLog { r#type: 9, addr: String::new(), amount: String::new() };
        assert_eq!(log.kind(), None);
    }
}
