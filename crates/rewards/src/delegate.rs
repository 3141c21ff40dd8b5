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

//! Fixed-width delegate identifiers.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Width of a delegate name in bytes.
pub const DELEGATE_NAME_LEN: usize = 12;

/// Errors produced when normalizing a delegate name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("delegate name is empty")]
    Empty,
    #[error(
        "delegate name {name:?} is {len} bytes long, at most {max} bytes are allowed",
        max = DELEGATE_NAME_LEN
    )]
    TooLong { name: String, len: usize },
    #[error("delegate name {0:?} is not valid hex")]
    InvalidHex(String),
}

/// A delegate name as registered with the election committee: exactly 12 raw bytes.
///
/// Short human readable names are left-padded with zero bytes, and a 24 character
/// string is taken to be the hex encoding of the 12 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DelegateName([u8; DELEGATE_NAME_LEN]);

impl DelegateName {
    /// Normalizes a user supplied name.
    pub fn encode(raw: &str) -> Result<Self, NameError> {
        if raw.is_empty() {
            return Err(NameError::Empty);
        }
        if raw.len() == DELEGATE_NAME_LEN * 2 {
            let mut bytes = [0u8; DELEGATE_NAME_LEN];
            hex::decode_to_slice(raw, &mut bytes)
                .map_err(|_| NameError::InvalidHex(raw.to_string()))?;
            return Ok(Self(bytes));
        }
        let raw_bytes = raw.as_bytes();
        if raw_bytes.len() > DELEGATE_NAME_LEN {
            return Err(NameError::TooLong { name: raw.to_string(), len: raw_bytes.len() });
        }
        let mut bytes = [0u8; DELEGATE_NAME_LEN];
        bytes[DELEGATE_NAME_LEN - raw_bytes.len()..].copy_from_slice(raw_bytes);
        Ok(Self(bytes))
    }

    pub const fn from_bytes(bytes: [u8; DELEGATE_NAME_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DELEGATE_NAME_LEN] {
        &self.0
    }

    /// Lowercase hex encoding of the 12 bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for DelegateName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::encode(s)
    }
}

/// Renders the name without its zero padding. Interior zero bytes become `#` so the result
/// is safe to embed in file names.
impl fmt::Display for DelegateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trimmed = match self.0.iter().position(|b| *b != 0) {
            Some(start) => &self.0[start..],
            None => &[][..],
        };
        let end = trimmed.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        let text: String = String::from_utf8_lossy(&trimmed[..end])
            .chars()
            .map(|c| if c == '\0' { '#' } else { c })
            .collect();
        f.write_str(&text)
    }
}

impl fmt::Debug for DelegateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DelegateName({:?}, 0x{})", self.to_string(), self.to_hex())
    }
}
