//! Payment-method categories
//!
//! Closed set of categories. Each variant owns a static field table, so
//! adding a category forces every `match` over it to be revisited.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::field::{FieldDefinition, FieldKind, FieldSetDefinition};

static BANK_TRANSFER: FieldSetDefinition = FieldSetDefinition {
    category_key: "bank_transfer",
    display_label: "Bank Transfer",
    fields: &[
        FieldDefinition::required("account", "Account Number", FieldKind::Text),
        FieldDefinition::optional("bank_code", "SWIFT or IFSC code", FieldKind::Text),
        FieldDefinition::required("bank_name", "Bank Name", FieldKind::Text),
        FieldDefinition::optional("branch", "Branch", FieldKind::Text),
    ],
};

static ALIPAY: FieldSetDefinition = FieldSetDefinition {
    category_key: "alipay",
    display_label: "Alipay",
    fields: &[FieldDefinition::required("alipay_id", "Alipay ID", FieldKind::Text)],
};

const WALLET_IDENTIFIER: FieldDefinition =
    FieldDefinition::required("identifier", "Email or phone number", FieldKind::Email);

static GOOGLE_PAY: FieldSetDefinition = FieldSetDefinition {
    category_key: "google_pay",
    display_label: "Google Pay",
    fields: &[WALLET_IDENTIFIER],
};

static PAYPAL: FieldSetDefinition = FieldSetDefinition {
    category_key: "paypal",
    display_label: "PayPal",
    fields: &[WALLET_IDENTIFIER],
};

static SKRILL: FieldSetDefinition = FieldSetDefinition {
    category_key: "skrill",
    display_label: "Skrill",
    fields: &[WALLET_IDENTIFIER],
};

/// Payment-method category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodCategory {
    BankTransfer,
    Alipay,
    GooglePay,
    Paypal,
    Skrill,
}

impl PaymentMethodCategory {
    /// All categories in display order
    pub const ALL: [PaymentMethodCategory; 5] = [
        Self::BankTransfer,
        Self::Alipay,
        Self::GooglePay,
        Self::Paypal,
        Self::Skrill,
    ];

    pub fn all() -> impl Iterator<Item = PaymentMethodCategory> {
        Self::ALL.into_iter()
    }

    pub fn field_set(&self) -> &'static FieldSetDefinition {
        match self {
            Self::BankTransfer => &BANK_TRANSFER,
            Self::Alipay => &ALIPAY,
            Self::GooglePay => &GOOGLE_PAY,
            Self::Paypal => &PAYPAL,
            Self::Skrill => &SKRILL,
        }
    }

    pub fn key(&self) -> &'static str {
        self.field_set().category_key
    }

    pub fn label(&self) -> &'static str {
        self.field_set().display_label
    }

    /// Backend grouping used when listing saved methods
    pub fn method_type(&self) -> &'static str {
        match self {
            Self::BankTransfer => "bank",
            Self::Alipay | Self::GooglePay | Self::Paypal | Self::Skrill => "ewallet",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().find(|c| c.key() == key)
    }
}

impl fmt::Display for PaymentMethodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
