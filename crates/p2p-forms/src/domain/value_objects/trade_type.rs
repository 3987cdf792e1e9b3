//! Trade type of an ad

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the advertiser buys or sells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    #[default]
    Buy,
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Case-insensitive parse of `buy` / `sell`
    pub fn from_str_loose(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_buy() {
        assert_eq!(TradeType::default(), TradeType::Buy);
    }

    #[test]
    fn test_loose_parse() {
        assert_eq!(TradeType::from_str_loose("Sell"), Some(TradeType::Sell));
        assert_eq!(TradeType::from_str_loose(" BUY "), Some(TradeType::Buy));
        assert_eq!(TradeType::from_str_loose("swap"), None);
    }
}
