//! Value Objects module
//!
//! Immutable, validated domain primitives.

pub mod ad_data;
pub mod amount;
pub mod category;
pub mod field;
pub mod notice;
pub mod saved_method;
pub mod trade_type;

pub use ad_data::{AdFormAmounts, AdFormData};
pub use amount::{Amount, AmountError};
pub use category::PaymentMethodCategory;
pub use field::{FieldDefinition, FieldKind, FieldSetDefinition};
pub use notice::{FormNotice, NoticeKind};
pub use saved_method::{FieldValue, SavedPaymentMethod};
pub use trade_type::TradeType;

/// Identifier of one open form session
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FormId(String);

impl FormId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FormId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FormId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
