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

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use bookkeeper_rewards::{
    output_file_name, AddressFormat, BatchTransfer, DelegateName, DistributionReport,
    DistributionSettings, Distributor, EpochRewardResolver, LedgerCsv, OutputUnit, Percentage,
    TransferMethod,
};
use clap::Args;

use crate::{
    chain_client::{IotexClient, DEFAULT_ENDPOINT},
    config::GlobalConfig,
    config_file::{BookkeeperConfig, DEFAULT_CONFIG_PATH},
    display::DisplayManager,
};

/// Printed before every export.
pub const DISCLAIMER: &str = "This bookkeeper is a reference implementation of a reward \
distribution tool. Its authors disclaim all responsibility for any damages or losses \
(including, without limitation, financial loss, damages for loss in business projects, loss \
of profits or other consequential losses) arising in contract, tort or otherwise from the use \
of or inability to use the bookkeeper, or from any action or decision taken as a result of \
using it.";

/// Export the reward distribution of a delegate over a range of epochs
#[derive(Args, Clone, Debug)]
pub struct BookkeeperExport {
    /// Delegate name, or its 24 character hex encoding
    pub delegate: String,

    /// Path of the committee configuration file
    #[clap(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// First epoch of the range
    #[clap(long)]
    pub start: u64,

    /// Last epoch of the range, included
    #[clap(long)]
    pub to: u64,

    /// Chain API endpoint (host:port)
    #[clap(long, short = 'e', default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Share of the epoch reward handed out to voters, in percent
    #[clap(long, short = 'p', default_value = "100")]
    pub percentage: Percentage,

    /// Count the foundation bonus as part of the epoch reward
    #[clap(long, short = 'w')]
    pub with_foundation_bonus: bool,

    /// Unit of the exported amounts (Rau or IOTX)
    #[clap(long, short = 'u', default_value = "Rau")]
    pub unit: OutputUnit,

    /// Write addresses in io1 form instead of hex
    #[clap(long, short = 'i')]
    pub in_io_address: bool,

    /// Start the CSV with an `address,reward` header row
    #[clap(long)]
    pub header: bool,

    /// Write batch-transfer call data instead of a CSV
    #[clap(long)]
    pub bytecode: bool,

    /// Payload message of the batch transfer
    #[clap(long, requires = "bytecode")]
    pub message: Option<String>,

    /// Contract function the batch transfer is encoded for (multi-send or send-coin)
    #[clap(long, default_value = "multi-send")]
    pub method: TransferMethod,

    /// Directory the output file is written to
    #[clap(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Connect to the chain API without TLS
    #[clap(long)]
    pub plaintext: bool,
}

impl BookkeeperExport {
    /// Run the export command
    pub async fn run(&self, global_config: &GlobalConfig) -> Result<()> {
        let display = DisplayManager::new();

        let delegate = DelegateName::encode(&self.delegate)
            .with_context(|| format!("Invalid delegate name {:?}", self.delegate))?;
        let settings = DistributionSettings::new(delegate, self.start, self.to, self.percentage)?
            .with_foundation_bonus(self.with_foundation_bonus)
            .with_call_timeout(global_config.call_timeout());
        let config = BookkeeperConfig::load(&self.config)?;

        display.note(DISCLAIMER);
        if settings.percentage().exceeds_full() {
            display.warning(&format!("Percentage {} is larger than 100%", settings.percentage()));
        }
        if settings.is_long_range() {
            display.warning(&format!(
                "Fetching voters for {} epochs may take a long time",
                settings.epoch_count()
            ));
        }

        display.header("Calculating Distribution");
        display.item("Delegate", format!("{} ({})", delegate, delegate.to_hex()));
        display.item("Epochs", format!("{} to {}", settings.start(), settings.to()));
        display.item("Percentage", settings.percentage());

        let committee = config.committee_client()?;
        let chain =
            IotexClient::connect(&self.endpoint, self.plaintext, settings.call_timeout()).await?;
        let resolver = EpochRewardResolver::new(chain.clone(), config.schedule());
        let report = Distributor::new(&chain, &committee, &resolver).run(&settings).await?;

        display.header("Epochs");
        for summary in &report.epochs {
            display.epoch(summary, self.unit)?;
        }
        if report.ledger.is_empty() {
            display.warning("No rewards to distribute in the selected epochs");
        }

        let file_name = output_file_name(&delegate, self.start, self.to, self.unit, self.bytecode);
        let path = self.output_dir.join(&file_name);
        self.write_output(&report, &delegate, &path)?;

        display.header("Distribution");
        display.item("Voters", report.ledger.len());
        display.amount("Total", report.ledger.total()?, self.unit)?;
        display.success(&format!("Distribution written to {}", path.display()));
        println!("{}", path.display());
        Ok(())
    }

    fn write_output(
        &self,
        report: &DistributionReport,
        delegate: &DelegateName,
        path: &Path,
    ) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        if self.bytecode {
            let message = self.message.clone().unwrap_or_else(|| {
                format!("reward from delegate {} for epoch {} to {}", delegate, self.start, self.to)
            });
            let transfer = BatchTransfer::from_ledger(&report.ledger, message);
            writeln!(writer, "{}", hex::encode(transfer.encode(self.method)))?;
        } else {
            let address_format =
                if self.in_io_address { AddressFormat::IoAddress } else { AddressFormat::Hex };
            LedgerCsv { address_format, unit: self.unit, header: self.header }
                .write(&report.ledger, &mut writer)?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write output file {}", path.display()))
    }
}
