//! Ad amount values

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::trade_type::TradeType;

/// Validated ad amounts: every value positive, `min <= total` and
/// `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdFormAmounts {
    pub total_amount: Amount,
    pub fixed_rate: Amount,
    pub min_amount: Amount,
    pub max_amount: Amount,
}

/// Numeric view of the ad form as broadcast to listeners. Inputs that do
/// not parse read as zero; validity travels separately.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdFormData {
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    pub total_amount: Decimal,
    pub fixed_rate: Decimal,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
}
