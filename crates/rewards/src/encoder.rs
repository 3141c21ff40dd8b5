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

//! Rendering of a distribution as a CSV ledger or as batch-transfer call data.

use std::{fmt, io, str::FromStr};

use alloy::{
    primitives::{Address, U256},
    sol,
    sol_types::SolCall,
};

use crate::{
    address::{parse_address, to_io_address},
    amount::{checked_add, format_units_trimmed, parse_decimal_units, RAU_DECIMALS},
    delegate::DelegateName,
    error::EncodeError,
    ledger::DistributionLedger,
};

sol! {
    /// Batch transfer contract receiving the distribution.
    interface IMultisend {
        function multiSend(address[] recipients, uint256[] amounts, string payload) external payable;
        function sendCoin(address[] recipients, uint256[] amounts, string payload) external payable;
    }
}

/// Unit amounts are rendered or read in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputUnit {
    #[default]
    Rau,
    Iotx,
}

impl OutputUnit {
    /// Number of decimals between this unit and Rau.
    pub fn decimals(&self) -> u8 {
        match self {
            OutputUnit::Rau => 0,
            OutputUnit::Iotx => RAU_DECIMALS,
        }
    }

    /// Renders an amount of Rau in this unit.
    pub fn format(&self, rau: U256) -> Result<String, EncodeError> {
        Ok(format_units_trimmed(rau, self.decimals())?)
    }

    /// Parses a decimal amount given in this unit into Rau, truncating sub-Rau digits.
    pub fn parse(&self, text: &str) -> Result<U256, EncodeError> {
        Ok(parse_decimal_units(text, self.decimals())?)
    }
}

impl fmt::Display for OutputUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputUnit::Rau => f.write_str("Rau"),
            OutputUnit::Iotx => f.write_str("IOTX"),
        }
    }
}

impl FromStr for OutputUnit {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rau" => Ok(OutputUnit::Rau),
            "iotx" => Ok(OutputUnit::Iotx),
            _ => Err(EncodeError::InvalidUnit(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressFormat {
    /// EIP-55 checksummed `0x...`
    #[default]
    Hex,
    /// Native `io1...`
    IoAddress,
}

impl AddressFormat {
    pub fn render(&self, address: Address) -> Result<String, EncodeError> {
        match self {
            AddressFormat::Hex => Ok(address.to_checksum(None)),
            AddressFormat::IoAddress => Ok(to_io_address(address)?),
        }
    }
}

/// Writer for the human readable `address,reward` ledger.
#[derive(Clone, Copy, Debug, Default)]
pub struct LedgerCsv {
    pub address_format: AddressFormat,
    pub unit: OutputUnit,
    pub header: bool,
}

impl LedgerCsv {
    /// Writes every ledger entry, largest reward first.
    pub fn write<W: io::Write>(
        &self,
        ledger: &DistributionLedger,
        writer: W,
    ) -> Result<(), EncodeError> {
        let mut csv = csv::Writer::from_writer(writer);
        if self.header {
            csv.write_record(["address", "reward"])?;
        }
        for (address, reward) in ledger.sorted_entries() {
            let address = self.address_format.render(address)?;
            csv.write_record([address, self.unit.format(reward)?])?;
        }
        csv.flush()?;
        Ok(())
    }
}

/// Contract function a batch transfer is encoded for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransferMethod {
    /// `multiSend(address[],uint256[],string)`
    #[default]
    MultiSend,
    /// `sendCoin(address[],uint256[],string)`
    SendCoin,
}

impl fmt::Display for TransferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMethod::MultiSend => f.write_str("multi-send"),
            TransferMethod::SendCoin => f.write_str("send-coin"),
        }
    }
}

impl FromStr for TransferMethod {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "multi-send" | "multisend" => Ok(TransferMethod::MultiSend),
            "send-coin" | "sendcoin" => Ok(TransferMethod::SendCoin),
            _ => Err(EncodeError::InvalidMethod(s.to_string())),
        }
    }
}

/// Recipients and amounts of a single batch-transfer call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchTransfer {
    recipients: Vec<Address>,
    amounts: Vec<U256>,
    payload: String,
}

impl BatchTransfer {
    /// Builds a transfer paying every ledger entry, in the same order as the CSV ledger.
    pub fn from_ledger(ledger: &DistributionLedger, payload: impl Into<String>) -> Self {
        let (recipients, amounts) = ledger.sorted_entries().into_iter().unzip();
        Self { recipients, amounts, payload: payload.into() }
    }

    pub fn from_entries(
        recipients: Vec<Address>,
        amounts: Vec<U256>,
        payload: impl Into<String>,
    ) -> Result<Self, EncodeError> {
        if recipients.len() != amounts.len() {
            return Err(EncodeError::LengthMismatch {
                recipients: recipients.len(),
                amounts: amounts.len(),
            });
        }
        Ok(Self { recipients, amounts, payload: payload.into() })
    }

    /// Replaces the payload message.
    pub fn with_payload(self, payload: impl Into<String>) -> Self {
        Self { payload: payload.into(), ..self }
    }

    pub fn recipients(&self) -> &[Address] {
        &self.recipients
    }

    pub fn amounts(&self) -> &[U256] {
        &self.amounts
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    /// Sum of all amounts.
    pub fn total(&self) -> Result<U256, EncodeError> {
        Ok(self.amounts.iter().try_fold(U256::ZERO, |acc, a| checked_add(acc, *a))?)
    }

    /// ABI encoded call data, selector included.
    pub fn encode(&self, method: TransferMethod) -> Vec<u8> {
        let recipients = self.recipients.clone();
        let amounts = self.amounts.clone();
        let payload = self.payload.clone();
        match method {
            TransferMethod::MultiSend => {
                IMultisend::multiSendCall { recipients, amounts, payload }.abi_encode()
            }
            TransferMethod::SendCoin => {
                IMultisend::sendCoinCall { recipients, amounts, payload }.abi_encode()
            }
        }
    }
}

/// Reads `address,amount` rows without a header into a transfer with an empty payload.
///
/// Amounts are decimals in `unit` and are truncated to whole Rau.
pub fn read_transfer_csv<R: io::Read>(
    reader: R,
    unit: OutputUnit,
) -> Result<BatchTransfer, EncodeError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut recipients = Vec::new();
    let mut amounts = Vec::new();
    for record in csv.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != 2 {
            return Err(EncodeError::MalformedRow {
                line,
                reason: format!("expected address and amount, got {} fields", record.len()),
            });
        }
        let (address, amount) = (&record[0], &record[1]);
        let address = parse_address(address)
            .map_err(|e| EncodeError::MalformedRow { line, reason: e.to_string() })?;
        let amount = unit
            .parse(amount)
            .map_err(|e| EncodeError::MalformedRow { line, reason: e.to_string() })?;
        recipients.push(address);
        amounts.push(amount);
    }
    if recipients.is_empty() {
        return Err(EncodeError::EmptyInput);
    }
    BatchTransfer::from_entries(recipients, amounts, "")
}

/// Name of the file an export is written to.
///
/// `<delegate>_epoch_<start>_to_<to>_in_<unit>.csv`, or `.txt` for call data.
pub fn output_file_name(
    delegate: &DelegateName,
    start: u64,
    to: u64,
    unit: OutputUnit,
    bytecode: bool,
) -> String {
    let extension = if bytecode { "txt" } else { "csv" };
    format!("{delegate}_epoch_{start}_to_{to}_in_{unit}.{extension}")
}
