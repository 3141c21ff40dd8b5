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

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use bookkeeper_rewards::{read_transfer_csv, OutputUnit, TransferMethod};
use clap::Args;

use crate::config::GlobalConfig;

/// Convert an `address,amount` CSV into batch-transfer call data
#[derive(Args, Clone, Debug)]
pub struct BookkeeperConvert {
    /// CSV file with one `address,amount` row per recipient and no header
    pub csv: PathBuf,

    /// Unit of the amounts in the CSV (Rau or IOTX)
    #[clap(long, default_value = "Rau")]
    pub input_unit: OutputUnit,

    /// Contract function to encode the call for (multi-send or send-coin)
    #[clap(long, default_value = "multi-send")]
    pub method: TransferMethod,

    /// Payload message attached to the transfer
    #[clap(long, default_value = "")]
    pub payload: String,
}

impl BookkeeperConvert {
    /// Run the convert command
    pub async fn run(&self, _global_config: &GlobalConfig) -> Result<()> {
        let file = File::open(&self.csv)
            .with_context(|| format!("Failed to open {}", self.csv.display()))?;
        let transfer = read_transfer_csv(file, self.input_unit)
            .with_context(|| format!("Failed to read transfers from {}", self.csv.display()))?
            .with_payload(self.payload.as_str());
        tracing::debug!("Encoding {} transfers for {}", transfer.len(), self.method);

        let total = transfer.total()?;
        println!("Total Amount: {} IOTX or {} Rau", OutputUnit::Iotx.format(total)?, total);
        println!("Byte Code: {}", hex::encode(transfer.encode(self.method)));
        Ok(())
    }
}
