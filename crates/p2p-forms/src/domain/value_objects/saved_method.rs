//! Saved payment method as returned by the payment-methods endpoint

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::PaymentMethodCategory;

/// Detail value. The API returns either a bare string or an object with a
/// `value` key depending on the endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Plain(String),
    Wrapped { value: String },
}

impl FieldValue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(v) => v,
            Self::Wrapped { value } => value,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPaymentMethod {
    pub id: u64,
    pub display_name: String,
    pub method: String,
    #[serde(rename = "type")]
    pub method_type: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl SavedPaymentMethod {
    pub const INSTRUCTIONS: &'static str = "instructions";

    pub fn category(&self) -> Option<PaymentMethodCategory> {
        PaymentMethodCategory::from_key(&self.method)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(FieldValue::as_str)
    }

    pub fn instructions(&self) -> Option<&str> {
        self.field(Self::INSTRUCTIONS)
    }

    /// Detail names excluding instructions, in key order
    pub fn detail_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .keys()
            .map(String::as_str)
            .filter(|name| *name != Self::INSTRUCTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_both_value_shapes() {
        let json = r#"{
            "id": 7,
            "display_name": "Bank Transfer",
            "method": "bank_transfer",
            "type": "bank",
            "fields": {
                "account": { "value": "1234567890" },
                "bank_name": "Maybank",
                "instructions": "Transfer within 15 minutes"
            }
        }"#;
        let saved: SavedPaymentMethod = serde_json::from_str(json).unwrap();
        assert_eq!(saved.field("account"), Some("1234567890"));
        assert_eq!(saved.field("bank_name"), Some("Maybank"));
        assert_eq!(saved.instructions(), Some("Transfer within 15 minutes"));
        assert_eq!(saved.category(), Some(PaymentMethodCategory::BankTransfer));
        assert_eq!(saved.detail_names().collect::<Vec<_>>(), vec!["account", "bank_name"]);
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let json = r#"{"id": 1, "display_name": "Alipay", "method": "alipay", "type": "ewallet"}"#;
        let saved: SavedPaymentMethod = serde_json::from_str(json).unwrap();
        assert!(saved.fields.is_empty());
        assert_eq!(saved.instructions(), None);
    }
}
