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

//! Commands of the bookkeeper CLI.

mod convert;
mod dump;
mod export;

pub use convert::BookkeeperConvert;
pub use dump::{write_votes, BookkeeperDump};
pub use export::{BookkeeperExport, DISCLAIMER};

use clap::Subcommand;

use crate::config::GlobalConfig;

/// Commands for reward bookkeeping
#[derive(Subcommand, Clone, Debug)]
pub enum BookkeeperCommands {
    /// Export the reward distribution of a delegate over a range of epochs
    Export(Box<BookkeeperExport>),
    /// Convert an `address,amount` CSV into batch-transfer call data
    Convert(BookkeeperConvert),
    /// Dump every vote of the election result at a height as CSV
    Dump(BookkeeperDump),
}

impl BookkeeperCommands {
    /// Run the command
    pub async fn run(&self, global_config: &GlobalConfig) -> anyhow::Result<()> {
        match self {
            Self::Export(cmd) => cmd.run(global_config).await,
            Self::Convert(cmd) => cmd.run(global_config).await,
            Self::Dump(cmd) => cmd.run(global_config).await,
        }
    }
}
