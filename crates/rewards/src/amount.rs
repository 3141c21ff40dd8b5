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

//! Exact amount arithmetic.
//!
//! All reward math is done on [U256] values. Products are formed in 512 bits so that
//! `a * b / d` never wraps; a quotient that does not fit back into 256 bits is reported
//! as [AmountError::Overflow].

use std::{fmt, str::FromStr};

use alloy::primitives::{
    utils::{format_units, parse_units, ParseUnits, UnitsError},
    Uint, U256,
};
use thiserror::Error;

type U512 = Uint<512, 8>;

/// Number of decimals between Rau and IOTX.
pub const RAU_DECIMALS: u8 = 18;

/// One IOTX expressed in Rau (10^18).
pub const ONE_IOTX: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Errors produced by amount arithmetic and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount does not fit into 256 bits")]
    Overflow,
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid decimal amount {0:?}")]
    InvalidDecimal(String),
    #[error("invalid integer amount {0:?}")]
    InvalidInteger(String),
    #[error("invalid percentage {0:?}")]
    InvalidPercentage(String),
    #[error("unsupported number of decimals {0}")]
    Decimals(u8),
}

fn widen(value: U256) -> U512 {
    U512::from_be_slice(&value.to_be_bytes::<32>())
}

fn narrow(value: U512) -> Result<U256, AmountError> {
    let bytes = value.to_be_bytes::<64>();
    if bytes[..32].iter().any(|b| *b != 0) {
        return Err(AmountError::Overflow);
    }
    Ok(U256::from_be_slice(&bytes[32..]))
}

/// Computes `floor(a * b / denominator)` without intermediate overflow.
pub fn mul_div_floor(a: U256, b: U256, denominator: U256) -> Result<U256, AmountError> {
    if denominator.is_zero() {
        return Err(AmountError::DivisionByZero);
    }
    narrow(widen(a) * widen(b) / widen(denominator))
}

/// Adds two amounts, failing instead of wrapping.
pub fn checked_add(a: U256, b: U256) -> Result<U256, AmountError> {
    a.checked_add(b).ok_or(AmountError::Overflow)
}

/// Converts a whole number of IOTX into Rau.
pub fn to_rau(whole: U256) -> Result<U256, AmountError> {
    whole.checked_mul(ONE_IOTX).ok_or(AmountError::Overflow)
}

/// Parses a base-10 integer such as the amount field of a reward log.
pub fn parse_integer(text: &str) -> Result<U256, AmountError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::InvalidInteger(text.to_string()));
    }
    U256::from_str_radix(text, 10).map_err(|_| AmountError::Overflow)
}

/// Parses a human entered decimal amount and scales it by `10^decimals`.
///
/// Fractional digits beyond `decimals` are truncated, never rounded: `"1.9999"` with two
/// decimals is `199`.
pub fn parse_decimal_units(text: &str, decimals: u8) -> Result<U256, AmountError> {
    let invalid = || AmountError::InvalidDecimal(text.to_string());
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let normalized =
        if int_part.is_empty() { format!("0{unsigned}") } else { unsigned.to_string() };
    let value = match parse_units(&normalized, decimals) {
        Ok(ParseUnits::U256(value)) => value,
        Ok(ParseUnits::I256(_)) => return Err(invalid()),
        Err(UnitsError::InvalidUnit(_)) => return Err(AmountError::Decimals(decimals)),
        Err(_) => return Err(AmountError::Overflow),
    };

    // Scaling the integer part must not have wrapped.
    let whole = match int_part {
        "" => U256::ZERO,
        digits => U256::from_str_radix(digits, 10).map_err(|_| AmountError::Overflow)?,
    };
    if value / U256::from(10).pow(U256::from(decimals)) != whole {
        return Err(AmountError::Overflow);
    }
    Ok(value)
}

/// Renders `amount / 10^decimals` as an exact decimal with trailing zeros removed.
pub fn format_units_trimmed(amount: U256, decimals: u8) -> Result<String, AmountError> {
    let formatted =
        format_units(amount, decimals).map_err(|_| AmountError::Decimals(decimals))?;
    if !formatted.contains('.') {
        return Ok(formatted);
    }
    Ok(formatted.trim_end_matches('0').trim_end_matches('.').to_string())
}

/// Share of an epoch reward handed out to voters.
///
/// Stored in hundredths of a percent so that values such as `12.5` stay exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage {
    hundredths: u64,
}

impl Percentage {
    /// 100%.
    pub const FULL: Self = Self { hundredths: 10_000 };

    /// Percentage from a whole number, e.g. `50` for 50%.
    pub const fn from_whole(percent: u64) -> Self {
        Self { hundredths: percent.saturating_mul(100) }
    }

    /// Percentage from hundredths of a percent, e.g. `1250` for 12.5%.
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self { hundredths }
    }

    pub fn is_zero(&self) -> bool {
        self.hundredths == 0
    }

    /// Whether this percentage hands out more than the whole reward.
    pub fn exceeds_full(&self) -> bool {
        *self > Self::FULL
    }

    /// `floor(amount * self / 100)`.
    pub fn apply(&self, amount: U256) -> Result<U256, AmountError> {
        mul_div_floor(amount, U256::from(self.hundredths), U256::from(Self::FULL.hundredths))
    }
}

impl FromStr for Percentage {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountError::InvalidPercentage(s.to_string());
        let value = s.trim();
        let value = value.strip_suffix('%').unwrap_or(value);
        if let Some((_, frac)) = value.split_once('.') {
            if frac.len() > 2 {
                return Err(invalid());
            }
        }
        let hundredths = parse_decimal_units(value, 2).map_err(|_| invalid())?;
        let hundredths = u64::try_from(hundredths).map_err(|_| invalid())?;
        Ok(Self { hundredths })
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent =
            format_units_trimmed(U256::from(self.hundredths), 2).map_err(|_| fmt::Error)?;
        write!(f, "{percent}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_iotx_constant() {
        assert_eq!(ONE_IOTX, U256::from(10u64).pow(U256::from(18u64)));
    }

    #[test]
    fn test_to_rau_scales_exactly() {
        for whole in [0u64, 1, 7, 1_000_000] {
            assert_eq!(to_rau(U256::from(whole)).unwrap(), U256::from(whole) * ONE_IOTX);
        }
        assert_eq!(to_rau(U256::MAX), Err(AmountError::Overflow));
    }

    #[test]
    fn test_mul_div_floor() {
        let ten = U256::from(10);
        assert_eq!(mul_div_floor(ten, U256::from(1), U256::from(3)).unwrap(), U256::from(3));
        assert_eq!(mul_div_floor(ten, U256::from(2), U256::from(3)).unwrap(), U256::from(6));
        assert_eq!(
            mul_div_floor(U256::from(1), U256::from(1), U256::ZERO),
            Err(AmountError::DivisionByZero)
        );
    }

    #[test]
    fn test_mul_div_floor_uses_wide_intermediate() {
        // U256::MAX * 2 overflows 256 bits but the quotient fits.
        let result = mul_div_floor(U256::MAX, U256::from(2), U256::from(4)).unwrap();
        assert_eq!(result, U256::MAX / U256::from(2));
        assert_eq!(
            mul_div_floor(U256::MAX, U256::from(2), U256::from(1)),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn test_parse_decimal_units_truncates() {
        assert_eq!(
            parse_decimal_units("1.5", RAU_DECIMALS).unwrap(),
            U256::from(1_500_000_000_000_000_000u64)
        );
        assert_eq!(parse_decimal_units("1.9999", 2).unwrap(), U256::from(199));
        assert_eq!(parse_decimal_units(".5", 1).unwrap(), U256::from(5));
        assert_eq!(parse_decimal_units("3.", 0).unwrap(), U256::from(3));
        assert_eq!(parse_decimal_units(" 0.000 ", 3).unwrap(), U256::ZERO);
        assert_eq!(parse_decimal_units("+42", 0).unwrap(), U256::from(42));
        assert_eq!(parse_decimal_units("12.9", 0).unwrap(), U256::from(12));
        assert_eq!(parse_decimal_units(".5", 0).unwrap(), U256::ZERO);
        assert_eq!(parse_decimal_units("1.2", 100), Err(AmountError::Decimals(100)));
    }

    #[test]
    fn test_parse_decimal_units_overflow() {
        let max = U256::MAX.to_string();
        assert_eq!(parse_decimal_units(&max, 0).unwrap(), U256::MAX);
        assert_eq!(parse_decimal_units(&max, 18), Err(AmountError::Overflow));
    }

    #[test]
    fn test_parse_decimal_units_rejects_garbage() {
        for bad in ["", ".", "-1", "1.2.3", "abc", "1e18", "1,5"] {
            assert!(parse_decimal_units(bad, 18).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("1000").unwrap(), U256::from(1000));
        assert!(matches!(parse_integer("10.5"), Err(AmountError::InvalidInteger(_))));
        assert!(matches!(parse_integer(""), Err(AmountError::InvalidInteger(_))));
        assert!(matches!(parse_integer("-5"), Err(AmountError::InvalidInteger(_))));
    }

    #[test]
    fn test_format_units_trimmed() {
        let format = |amount: U256, decimals| format_units_trimmed(amount, decimals).unwrap();
        assert_eq!(format(U256::from(1_500_000_000_000_000_000u64), 18), "1.5");
        assert_eq!(format(ONE_IOTX, 18), "1");
        assert_eq!(format(U256::from(10) * ONE_IOTX, 18), "10");
        assert_eq!(format(U256::from(1), 18), "0.000000000000000001");
        assert_eq!(format(U256::ZERO, 18), "0");
        assert_eq!(format(U256::from(1234), 0), "1234");
        assert_eq!(format(U256::from(1200), 0), "1200");
        assert_eq!(format(U256::from(1250), 2), "12.5");
        assert_eq!(format_units_trimmed(U256::from(1), 100), Err(AmountError::Decimals(100)));
    }

    #[test]
    fn test_percentage() {
        assert_eq!("100".parse::<Percentage>().unwrap(), Percentage::FULL);
        assert_eq!("12.5%".parse::<Percentage>().unwrap(), Percentage::from_hundredths(1250));
        assert!("12.345".parse::<Percentage>().is_err());
        assert!("-1".parse::<Percentage>().is_err());
        assert!(Percentage::from_whole(0).is_zero());
        assert!(Percentage::from_whole(120).exceeds_full());
        assert!(!Percentage::FULL.exceeds_full());
        assert_eq!(Percentage::from_hundredths(1250).to_string(), "12.5%");
    }

    #[test]
    fn test_percentage_apply_floors() {
        let half = Percentage::from_whole(50);
        assert_eq!(half.apply(U256::from(1000)).unwrap(), U256::from(500));
        assert_eq!(half.apply(U256::from(7)).unwrap(), U256::from(3));
        assert_eq!(Percentage::from_whole(150).apply(U256::from(10)).unwrap(), U256::from(15));
    }
}
