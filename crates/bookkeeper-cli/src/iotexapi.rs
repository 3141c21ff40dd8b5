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

//! Subset of the `iotexapi.APIService` messages used by the bookkeeper.
//!
//! Only the fields read or written here are declared. Other fields are skipped when decoding.

#![allow(missing_docs)]

pub const GET_BLOCK_METAS: &str = "/iotexapi.APIService/GetBlockMetas";
pub const GET_ACTIONS: &str = "/iotexapi.APIService/GetActions";
pub const GET_RECEIPT_BY_ACTION: &str = "/iotexapi.APIService/GetReceiptByAction";
pub const GET_EPOCH_META: &str = "/iotexapi.APIService/GetEpochMeta";

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetBlockMetasRequest {
    #[prost(message, optional, tag = "1")]
    pub by_index: Option<GetBlockMetasByIndexRequest>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetBlockMetasByIndexRequest {
    #[prost(uint64, tag = "1")]
    pub start: u64,
    #[prost(uint64, tag = "2")]
    pub count: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetBlockMetasResponse {
    #[prost(uint64, tag = "1")]
    pub total: u64,
    #[prost(message, repeated, tag = "2")]
    pub blk_metas: Vec<BlockMeta>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BlockMeta {
    #[prost(string, tag = "1")]
    pub hash: String,
    #[prost(uint64, tag = "2")]
    pub height: u64,
    #[prost(int64, tag = "4")]
    pub num_actions: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetActionsRequest {
    #[prost(message, optional, tag = "5")]
    pub by_blk: Option<GetActionsByBlockRequest>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetActionsByBlockRequest {
    #[prost(string, tag = "1")]
    pub blk_hash: String,
    #[prost(uint64, tag = "2")]
    pub start: u64,
    #[prost(uint64, tag = "3")]
    pub count: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetActionsResponse {
    #[prost(message, repeated, tag = "1")]
    pub action_info: Vec<ActionInfo>,
    #[prost(uint64, tag = "2")]
    pub total: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ActionInfo {
    #[prost(message, optional, tag = "1")]
    pub action: Option<Action>,
    #[prost(string, tag = "2")]
    pub act_hash: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Action {
    #[prost(message, optional, tag = "1")]
    pub core: Option<ActionCore>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ActionCore {
    #[prost(message, optional, tag = "30")]
    pub grant_reward: Option<GrantReward>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GrantReward {
    #[prost(int32, tag = "1")]
    pub r#type: i32,
    #[prost(uint64, tag = "2")]
    pub height: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetReceiptByActionRequest {
    #[prost(string, tag = "1")]
    pub action_hash: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetReceiptByActionResponse {
    #[prost(message, optional, tag = "1")]
    pub receipt_info: Option<ReceiptInfo>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ReceiptInfo {
    #[prost(message, optional, tag = "1")]
    pub receipt: Option<Receipt>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Receipt {
    #[prost(message, repeated, tag = "6")]
    pub logs: Vec<Log>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Log {
    #[prost(bytes = "vec", tag = "3")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetEpochMetaRequest {
    #[prost(uint64, tag = "1")]
    pub epoch_number: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetEpochMetaResponse {
    #[prost(message, optional, tag = "1")]
    pub epoch_data: Option<EpochData>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EpochData {
    #[prost(uint64, tag = "1")]
    pub num: u64,
    #[prost(uint64, tag = "2")]
    pub height: u64,
    #[prost(uint64, tag = "3")]
    pub gravity_chain_start_height: u64,
}
