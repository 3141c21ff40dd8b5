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

//! Conversion between 20-byte addresses and the chain's native `io1...` form.

use alloy::primitives::Address;
use bech32::{FromBase32, ToBase32, Variant};
use thiserror::Error;

/// Human readable part of native addresses.
pub const IO_ADDRESS_HRP: &str = "io";

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid address {0:?}")]
    Invalid(String),
    #[error("failed to encode address {address}: {source}")]
    Encode { address: Address, source: bech32::Error },
}

/// Encodes an address as `io1...`.
pub fn to_io_address(address: Address) -> Result<String, AddressError> {
    bech32::encode(IO_ADDRESS_HRP, address.as_slice().to_base32(), Variant::Bech32)
        .map_err(|source| AddressError::Encode { address, source })
}

/// Decodes an `io1...` address.
pub fn from_io_address(text: &str) -> Result<Address, AddressError> {
    let invalid = || AddressError::Invalid(text.to_string());
    let (hrp, data, variant) = bech32::decode(text).map_err(|_| invalid())?;
    if hrp != IO_ADDRESS_HRP || variant != Variant::Bech32 {
        return Err(invalid());
    }
    let bytes = Vec::<u8>::from_base32(&data).map_err(|_| invalid())?;
    if bytes.len() != 20 {
        return Err(invalid());
    }
    Ok(Address::from_slice(&bytes))
}

/// Parses an address given as `0x` hex, bare hex, or `io1...`. Hex input is case-insensitive.
pub fn parse_address(text: &str) -> Result<Address, AddressError> {
    let text = text.trim();
    if text.starts_with(IO_ADDRESS_HRP) && !text.starts_with("0x") {
        return from_io_address(text);
    }
    let bare = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(bare, &mut bytes).map_err(|_| AddressError::Invalid(text.to_string()))?;
    Ok(Address::from(bytes))
}
