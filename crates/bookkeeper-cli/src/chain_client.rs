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

//! gRPC client for the IoTeX chain API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bookkeeper_rewards::{
    ActionInfo, BlockMeta, ChainQuery, GravityHeightResolver, Receipt, ReceiptLog,
};
use tonic::{
    client::Grpc,
    codec::ProstCodec,
    codegen::http::uri::PathAndQuery,
    transport::{Channel, ClientTlsConfig, Endpoint},
};

use crate::iotexapi;

/// Default chain API endpoint
pub const DEFAULT_ENDPOINT: &str = "api.iotex.one:443";

/// Connection to `iotexapi.APIService`, shared by every query of a run
#[derive(Clone, Debug)]
pub struct IotexClient {
    grpc: Grpc<Channel>,
}

fn endpoint_uri(endpoint: &str, plaintext: bool) -> String {
    if endpoint.contains("://") {
        return endpoint.to_string();
    }
    let scheme = if plaintext { "http" } else { "https" };
    format!("{scheme}://{endpoint}")
}

impl IotexClient {
    /// Connect to `endpoint` (`host:port`), over TLS unless `plaintext` is set
    pub async fn connect(endpoint: &str, plaintext: bool, timeout: Duration) -> Result<Self> {
        let uri = endpoint_uri(endpoint, plaintext);
        let mut builder = Endpoint::from_shared(uri.clone())
            .with_context(|| format!("Invalid chain endpoint {}", endpoint))?
            .timeout(timeout)
            .connect_timeout(timeout);
        if !plaintext {
            builder = builder
                .tls_config(ClientTlsConfig::new().with_webpki_roots())
                .context("Failed to configure TLS")?;
        }

        tracing::debug!("Connecting to chain API at {}", uri);
        let channel = builder
            .connect()
            .await
            .with_context(|| format!("Failed to connect to chain API at {}", uri))?;
        Ok(Self { grpc: Grpc::new(channel) })
    }

    async fn unary<Req, Resp>(&self, method: &'static str, request: Req) -> Result<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = self.grpc.clone();
        grpc.ready().await.context("Chain API is not ready")?;
        tracing::trace!("Calling {}", method);
        let response = grpc
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(method),
                ProstCodec::default(),
            )
            .await
            .with_context(|| format!("{} failed", method))?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl ChainQuery for IotexClient {
    async fn block_meta_by_height(&self, height: u64) -> Result<Option<BlockMeta>> {
        let request = iotexapi::GetBlockMetasRequest {
            by_index: Some(iotexapi::GetBlockMetasByIndexRequest { start: height, count: 1 }),
        };
        let response: iotexapi::GetBlockMetasResponse =
            self.unary(iotexapi::GET_BLOCK_METAS, request).await?;

        let Some(meta) = response.blk_metas.into_iter().next() else {
            return Ok(None);
        };
        let num_actions = u64::try_from(meta.num_actions).with_context(|| {
            format!("Block {} reports {} actions", meta.height, meta.num_actions)
        })?;
        Ok(Some(BlockMeta { hash: meta.hash, height: meta.height, num_actions }))
    }

    async fn action_in_block(&self, block_hash: &str, index: u64) -> Result<Option<ActionInfo>> {
        let request = iotexapi::GetActionsRequest {
            by_blk: Some(iotexapi::GetActionsByBlockRequest {
                blk_hash: block_hash.to_string(),
                start: index,
                count: 1,
            }),
        };
        let response: iotexapi::GetActionsResponse =
            self.unary(iotexapi::GET_ACTIONS, request).await?;

        Ok(response.action_info.into_iter().next().map(|info| {
            let is_grant_reward = info
                .action
                .and_then(|action| action.core)
                .and_then(|core| core.grant_reward)
                .is_some();
            ActionInfo { hash: info.act_hash, is_grant_reward }
        }))
    }

    async fn receipt_by_action(&self, action_hash: &str) -> Result<Receipt> {
        let request =
            iotexapi::GetReceiptByActionRequest { action_hash: action_hash.to_string() };
        let response: iotexapi::GetReceiptByActionResponse =
            self.unary(iotexapi::GET_RECEIPT_BY_ACTION, request).await?;

        let receipt = response
            .receipt_info
            .and_then(|info| info.receipt)
            .with_context(|| format!("No receipt for action {}", action_hash))?;
        let logs = receipt.logs.into_iter().map(|log| ReceiptLog { data: log.data }).collect();
        Ok(Receipt { logs })
    }
}

#[async_trait]
impl GravityHeightResolver for IotexClient {
    async fn resolve_gravity_height(&self, epoch: u64) -> Result<u64> {
        let request = iotexapi::GetEpochMetaRequest { epoch_number: epoch };
        let response: iotexapi::GetEpochMetaResponse =
            self.unary(iotexapi::GET_EPOCH_META, request).await?;
        let epoch_data =
            response.epoch_data.with_context(|| format!("No epoch data for epoch {}", epoch))?;
        Ok(epoch_data.gravity_chain_start_height)
    }
}
