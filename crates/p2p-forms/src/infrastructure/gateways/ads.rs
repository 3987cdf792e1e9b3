//! In-memory ad creation collaborator

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::dto::{ApiError, CreateAdPayload, SubmitResponse};
use crate::error::GatewayError;
use crate::ports::outbound::AdGateway;

/// Records every accepted payload. An ad without payment methods is
/// rejected the same way the backend rejects it.
#[derive(Debug, Default)]
pub struct InMemoryAdGateway {
    ads: Mutex<Vec<CreateAdPayload>>,
}

impl InMemoryAdGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn ads(&self) -> Vec<CreateAdPayload> {
        self.ads.lock().await.clone()
    }
}

#[async_trait]
impl AdGateway for InMemoryAdGateway {
    async fn create_ad(&self, payload: &CreateAdPayload) -> Result<SubmitResponse, GatewayError> {
        if payload.payment_method_names.is_empty() {
            return Ok(SubmitResponse::rejected(ApiError {
                code: "PaymentMethodRequired".into(),
                message: "Select at least one payment method for your ad".into(),
                field: None,
            }));
        }

        let mut ads = self.ads.lock().await;
        ads.push(payload.clone());
        Ok(SubmitResponse::accepted(Some(serde_json::json!({ "id": ads.len().to_string() }))))
    }
}
