//! Amount Value Object
//!
//! Strictly positive decimal parsed from raw form input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Positive decimal amount
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    /// Parse a user-entered amount. Surrounding whitespace is ignored; an
    /// empty input is `Empty`, never zero. Only plain decimal and exponent
    /// notation is a number: no digit separators, no `inf`/`nan`.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AmountError::Empty);
        }

        if !input.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')) {
            return Err(AmountError::NotANumber);
        }
        let approx: f64 = input.parse().map_err(|_| AmountError::NotANumber)?;
        let mantissa = input.split(|c| c == 'e' || c == 'E').next().unwrap_or(input);
        let significant = mantissa.bytes().any(|b| matches!(b, b'1'..=b'9'));
        if approx.is_sign_negative() || !significant {
            return Err(AmountError::NotPositive);
        }

        let value = Decimal::from_str(input)
            .or_else(|_| Decimal::from_scientific(input))
            .or_else(|_| Decimal::try_from(approx))
            .map_err(|_| if approx > 1.0 { AmountError::TooLarge } else { AmountError::TooSmall })?;

        // positive input that rounded away at 28 decimal places
        if value.is_zero() {
            return Err(AmountError::TooSmall);
        }
        Self::new(value)
    }

    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount is not a number")]
    NotANumber,
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount is too large")]
    TooLarge,
    #[error("amount is too small")]
    TooSmall,
}
