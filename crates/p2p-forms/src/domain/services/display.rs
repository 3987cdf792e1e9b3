//! Display helpers for saved payment methods

use serde::Serialize;

use crate::domain::value_objects::SavedPaymentMethod;

/// Primary and secondary lines of a saved method card
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MethodDisplay {
    pub primary: String,
    pub secondary: String,
}

/// Keep the first six and last four characters of an account number.
pub fn mask_account(account: &str) -> String {
    if account.is_empty() {
        return "****".to_string();
    }

    let chars: Vec<char> = account.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head}****{tail}")
}

pub fn category_display_name(method_type: &str) -> &'static str {
    match method_type {
        "bank" => "Bank transfer",
        "ewallet" => "eWallet",
        _ => "Other",
    }
}

pub fn display_details(method: &SavedPaymentMethod) -> MethodDisplay {
    let account = method.field("account").unwrap_or("");

    if method.method_type == "bank" {
        let bank_name = method
            .field("bank_name")
            .filter(|name| !name.is_empty())
            .unwrap_or("Bank Transfer");
        MethodDisplay {
            primary: mask_account(account),
            secondary: bank_name.to_string(),
        }
    } else {
        let primary = if account.is_empty() { method.display_name.as_str() } else { account };
        MethodDisplay {
            primary: primary.to_string(),
            secondary: method.display_name.clone(),
        }
    }
}
