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

//! Client for the election committee HTTP API.

#![allow(missing_docs)]

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use bookkeeper_rewards::{
    amount::parse_integer, delegate::DELEGATE_NAME_LEN, parse_address, Committee, Delegate,
    DelegateName, ElectionResult, Vote,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// Election committee reached over HTTP
#[derive(Clone, Debug)]
pub struct HttpCommittee {
    client: Client,
    base_url: Url,
}

impl HttpCommittee {
    /// Create a client for the committee at `base_url`
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bookkeeper/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    fn results_url(&self, height: u64) -> Result<Url> {
        self.base_url.join(&format!("v1/results/{}", height)).context("Failed to build URL")
    }
}

#[async_trait]
impl Committee for HttpCommittee {
    async fn fetch_result_by_height(&self, height: u64) -> Result<ElectionResult> {
        let url = self.results_url(height)?;
        tracing::debug!("Fetching election result from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch election result from {}", url))?;

        if !response.status().is_success() {
            bail!("API error from {}: {}", url, response.status());
        }

        let body: ElectionResultResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse election result from {}", url))?;
        body.into_result(height)
    }
}

/// Election result as served by the committee
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResultResponse {
    #[serde(default)]
    pub delegates: Vec<DelegateEntry>,
    #[serde(default)]
    pub votes: Vec<VoteEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateEntry {
    /// Hex encoded 12 byte name
    pub name: String,
    #[serde(default)]
    pub reward_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteEntry {
    /// Hex encoded voter address
    pub voter: String,
    /// Hex encoded 12 byte name of the delegate voted for
    pub candidate: String,
    pub amount: String,
    pub weighted_amount: String,
    /// Unix seconds
    pub start_time: u64,
    /// Seconds
    pub duration: u64,
    pub decay: bool,
}

fn parse_name(hex_name: &str) -> Result<DelegateName> {
    let mut bytes = [0u8; DELEGATE_NAME_LEN];
    hex::decode_to_slice(hex_name, &mut bytes)
        .with_context(|| format!("Invalid delegate name {hex_name:?}"))?;
    Ok(DelegateName::from_bytes(bytes))
}

impl ElectionResultResponse {
    /// Convert the response into an [ElectionResult] at `height`
    pub fn into_result(self, height: u64) -> Result<ElectionResult> {
        let delegates = self
            .delegates
            .into_iter()
            .map(|d| Ok(Delegate { name: parse_name(&d.name)?, reward_address: d.reward_address }))
            .collect::<Result<Vec<_>>>()?;

        let votes = self
            .votes
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                Ok(Vote {
                    voter: parse_address(&v.voter)
                        .with_context(|| format!("Invalid voter in vote {i}"))?,
                    candidate: parse_name(&v.candidate)?,
                    amount: parse_integer(&v.amount)
                        .with_context(|| format!("Invalid amount in vote {i}"))?,
                    weighted_amount: parse_integer(&v.weighted_amount)
                        .with_context(|| format!("Invalid weighted amount in vote {i}"))?,
                    start_time: v.start_time,
                    duration_secs: v.duration,
                    decay: v.decay,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ElectionResult { height, delegates, votes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, U256};

    const RESPONSE: &str = r#"{
        "delegates": [
            {"name": "0000000000726f626f746270", "rewardAddress": "io1robot"},
            {"name": "000000000000000073696c74"}
        ],
        "votes": [
            {
                "voter": "5e5b6a4f2c2cc08dd6f3ea50a7d1e3b9fbea6fbd",
                "candidate": "0000000000726f626f746270",
                "amount": "1000000000000000000000",
                "weightedAmount": "1250000000000000000000",
                "startTime": 1560000000,
                "duration": 1209600,
                "decay": true
            }
        ]
    }"#;

    #[test]
    fn test_parse_response() {
        let response: ElectionResultResponse = serde_json::from_str(RESPONSE).unwrap();
        let result = response.into_result(7_500_000).unwrap();
        let robot = DelegateName::encode("robotbp").unwrap();

        assert_eq!(result.height, 7_500_000);
        assert_eq!(result.delegate(&robot).unwrap().reward_address, "io1robot");
        assert_eq!(result.delegates[1].reward_address, "");

        let votes: Vec<_> = result.votes_by_delegate(&robot).collect();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].voter, address!("0x5e5b6a4f2c2cc08dd6f3ea50a7d1e3b9fbea6fbd"));
        assert_eq!(votes[0].weighted_amount, U256::from(1_250_000_000_000_000_000_000u128));
        assert_eq!(votes[0].duration_secs, 1_209_600);
        assert!(votes[0].decay);
    }

    #[test]
    fn test_rejects_malformed_votes() {
        let bad = RESPONSE.replace("\"1000000000000000000000\"", "\"12.5\"");
        let response: ElectionResultResponse = serde_json::from_str(&bad).unwrap();
        let err = response.into_result(1).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid amount in vote 0"));
    }

    #[test]
    fn test_results_url_keeps_base_path() {
        let committee = HttpCommittee::new(
            Url::parse("http://localhost:8080/election").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            committee.results_url(42).unwrap().as_str(),
            "http://localhost:8080/election/v1/results/42"
        );
    }
}
