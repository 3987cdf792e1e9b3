//! Outbound ports
//!
//! Interfaces the infrastructure must implement. A structured rejection is a
//! successful call returning `success: false`; `GatewayError` is reserved
//! for calls that produced no usable response.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::application::dto::{CreateAdPayload, SubmitResponse};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::SavedPaymentMethod;
use crate::error::GatewayError;

/// Payment methods collaborator
#[async_trait]
pub trait PaymentMethodGateway: Send + Sync {
    /// Save a new payment method of the given category
    async fn add_payment_method(
        &self,
        method: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<SubmitResponse, GatewayError>;

    /// Replace the details of a saved payment method
    async fn update_payment_method(
        &self,
        id: u64,
        fields: &BTreeMap<String, String>,
    ) -> Result<SubmitResponse, GatewayError>;

    /// Saved payment methods of the current user
    async fn list_payment_methods(&self) -> Result<Vec<SavedPaymentMethod>, GatewayError>;
}

/// Ad creation collaborator
#[async_trait]
pub trait AdGateway: Send + Sync {
    async fn create_ad(&self, payload: &CreateAdPayload) -> Result<SubmitResponse, GatewayError>;
}

/// Domain event sink
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), GatewayError>;
}
