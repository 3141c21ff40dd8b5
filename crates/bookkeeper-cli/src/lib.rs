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

//! The bookkeeper CLI computes and exports the reward distributions of a delegate.

#![deny(missing_docs)]

pub mod chain_client;
pub mod commands;
pub mod committee_client;
pub mod config;
pub mod config_file;
pub mod display;
pub mod iotexapi;
