//! Cross-field validation of ad amounts
//!
//! Rules run in a fixed order and only the first failure per field is
//! kept:
//!
//! 1. every amount parses as a positive number
//! 2. `minAmount <= totalAmount` (reported on `minAmount`)
//! 3. `minAmount <= maxAmount` (reported on `maxAmount`)
//!
//! Rules 2 and 3 only run once all four inputs pass rule 1.

use serde::Serialize;
use std::fmt;

use crate::domain::validation::{ErrorKind, ValidationResult};
use crate::domain::value_objects::{AdFormAmounts, Amount, AmountError};

pub const MIN_ABOVE_TOTAL: &str = "Minimum amount must be less than or equal to total amount.";
pub const MAX_BELOW_MIN: &str = "Maximum amount must be greater than or equal to minimum amount.";

/// Amount inputs of the ad-details form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AdField {
    TotalAmount,
    FixedRate,
    MinAmount,
    MaxAmount,
}

impl AdField {
    pub const ALL: [AdField; 4] = [Self::TotalAmount, Self::FixedRate, Self::MinAmount, Self::MaxAmount];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TotalAmount => "totalAmount",
            Self::FixedRate => "fixedRate",
            Self::MinAmount => "minAmount",
            Self::MaxAmount => "maxAmount",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TotalAmount => "Total amount",
            Self::FixedRate => "Rate",
            Self::MinAmount => "Minimum amount",
            Self::MaxAmount => "Maximum amount",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    fn error_message(&self, error: AmountError) -> String {
        match error {
            AmountError::Empty => format!("{} is required", self.label()),
            AmountError::NotANumber => format!("{} must be a number", self.label()),
            AmountError::NotPositive => format!("{} must be greater than zero", self.label()),
            AmountError::TooLarge => format!("{} is too large", self.label()),
            AmountError::TooSmall => format!("{} is too small", self.label()),
        }
    }
}

impl fmt::Display for AdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmountValidation {
    pub result: ValidationResult,
    /// Parsed amounts, present only when every rule passed
    pub amounts: Option<AdFormAmounts>,
}

impl AmountValidation {
    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }
}

pub fn validate_ad_amounts(
    total_amount: &str,
    fixed_rate: &str,
    min_amount: &str,
    max_amount: &str,
) -> AmountValidation {
    let mut result = ValidationResult::valid();

    let mut parse = |field: AdField, input: &str| match Amount::parse(input) {
        Ok(amount) => Some(amount),
        Err(e) => {
            result.reject(field.name(), ErrorKind::Field, field.error_message(e));
            None
        }
    };

    let total = parse(AdField::TotalAmount, total_amount);
    let rate = parse(AdField::FixedRate, fixed_rate);
    let min = parse(AdField::MinAmount, min_amount);
    let max = parse(AdField::MaxAmount, max_amount);

    let (Some(total), Some(rate), Some(min), Some(max)) = (total, rate, min, max) else {
        return AmountValidation { result, amounts: None };
    };

    if min > total {
        result.reject(AdField::MinAmount.name(), ErrorKind::CrossField, MIN_ABOVE_TOTAL);
    }
    if min > max {
        result.reject(AdField::MaxAmount.name(), ErrorKind::CrossField, MAX_BELOW_MIN);
    }

    let amounts = result.is_valid().then_some(AdFormAmounts {
        total_amount: total,
        fixed_rate: rate,
        min_amount: min,
        max_amount: max,
    });

    AmountValidation { result, amounts }
}
