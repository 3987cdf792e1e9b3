//! Data Transfer Objects (DTOs)
//!
//! Request and response bodies exchanged with the collaborators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AdDefaults;
use crate::domain::aggregates::{AdDraft, SubmissionOutcome};
use crate::domain::value_objects::{FormNotice, TradeType};
use crate::error::GatewayError;

// =============================================================================
// Responses
// =============================================================================

/// One structured error from a collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub message: String,
    /// Field the error refers to, when the backend names one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiError>,
}

impl SubmitResponse {
    pub fn accepted(data: Option<Value>) -> Self {
        Self { success: true, data, errors: vec![] }
    }

    pub fn rejected(error: ApiError) -> Self {
        Self { success: false, data: None, errors: vec![error] }
    }

    /// Only the first error is shown. A rejection without a message falls
    /// back to the generic notice text.
    pub fn into_outcome(self) -> SubmissionOutcome {
        if self.success {
            return SubmissionOutcome::Accepted { data: self.data };
        }

        match self.errors.into_iter().next() {
            Some(error) => SubmissionOutcome::Rejected {
                message: if error.message.trim().is_empty() {
                    FormNotice::GENERIC_FAILURE.to_string()
                } else {
                    error.message
                },
                code: error.code,
                field: error.field,
            },
            None => SubmissionOutcome::Failed {
                reason: "rejected without errors".to_string(),
            },
        }
    }
}

/// Fold the collaborator result into what the form needs to resume
pub fn outcome_of(result: Result<SubmitResponse, GatewayError>) -> SubmissionOutcome {
    match result {
        Ok(response) => response.into_outcome(),
        Err(e) => SubmissionOutcome::Failed { reason: e.to_string() },
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAdPayload {
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    pub account_currency: String,
    pub payment_currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub minimum_order_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub maximum_order_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub available_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub exchange_rate: Decimal,
    pub exchange_rate_type: String,
    pub description: String,
    pub is_active: u8,
    pub order_expiry_period: u32,
    pub payment_method_names: Vec<String>,
}

impl CreateAdPayload {
    pub fn new(draft: &AdDraft, description: &str, defaults: &AdDefaults) -> Self {
        let amounts = &draft.amounts;
        Self {
            trade_type: draft.trade_type,
            account_currency: defaults.account_currency.clone(),
            payment_currency: defaults.payment_currency.clone(),
            minimum_order_amount: amounts.min_amount.value(),
            maximum_order_amount: amounts.max_amount.value(),
            available_amount: amounts.total_amount.value(),
            exchange_rate: amounts.fixed_rate.value(),
            exchange_rate_type: defaults.exchange_rate_type.clone(),
            description: description.trim().to_string(),
            is_active: u8::from(defaults.is_active),
            order_expiry_period: defaults.order_expiry_period,
            payment_method_names: draft.payment_method_names.clone(),
        }
    }
}
