//! In-memory payment methods collaborator

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::application::dto::{ApiError, SubmitResponse};
use crate::domain::schema::NOTES_FIELD;
use crate::domain::value_objects::{FieldValue, PaymentMethodCategory, SavedPaymentMethod};
use crate::error::GatewayError;
use crate::ports::outbound::PaymentMethodGateway;

/// Stores payment methods in memory and answers like the backend does:
/// duplicates and unknown ids are structured rejections.
#[derive(Debug)]
pub struct InMemoryPaymentMethodGateway {
    methods: Mutex<Vec<SavedPaymentMethod>>,
    next_id: AtomicU64,
    calls: AtomicUsize,
    fail_next: Mutex<Option<GatewayError>>,
}

impl Default for InMemoryPaymentMethodGateway {
    fn default() -> Self {
        Self {
            methods: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            calls: AtomicUsize::new(0),
            fail_next: Mutex::new(None),
        }
    }
}

impl InMemoryPaymentMethodGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_methods(methods: Vec<SavedPaymentMethod>) -> Self {
        let next_id = methods.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        Self {
            methods: Mutex::new(methods),
            next_id: AtomicU64::new(next_id),
            ..Self::default()
        }
    }

    /// Number of add/update calls received
    pub fn submit_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make the next add/update call fail at the transport level
    pub async fn fail_next(&self, error: GatewayError) {
        *self.fail_next.lock().await = Some(error);
    }

    pub async fn methods(&self) -> Vec<SavedPaymentMethod> {
        self.methods.lock().await.clone()
    }

    async fn record_call(&self) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_next.lock().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn details_of(method: &SavedPaymentMethod) -> BTreeMap<&str, &str> {
    method
        .fields
        .iter()
        .filter(|(name, _)| name.as_str() != NOTES_FIELD)
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect()
}

fn to_saved_fields(fields: &BTreeMap<String, String>) -> BTreeMap<String, FieldValue> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), FieldValue::Plain(value.clone())))
        .collect()
}

#[async_trait]
impl PaymentMethodGateway for InMemoryPaymentMethodGateway {
    async fn add_payment_method(
        &self,
        method: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<SubmitResponse, GatewayError> {
        self.record_call().await?;

        let Some(category) = PaymentMethodCategory::from_key(method) else {
            return Ok(SubmitResponse::rejected(ApiError {
                code: "InvalidPaymentMethod".into(),
                message: format!("Payment method {method} is not supported"),
                field: Some("method".into()),
            }));
        };

        let candidate = SavedPaymentMethod {
            id: 0,
            display_name: category.label().to_string(),
            method: method.to_string(),
            method_type: category.method_type().to_string(),
            fields: to_saved_fields(fields),
        };

        let mut methods = self.methods.lock().await;
        let duplicate = methods
            .iter()
            .any(|m| m.method == candidate.method && details_of(m) == details_of(&candidate));
        if duplicate {
            return Ok(SubmitResponse::rejected(ApiError {
                code: "DuplicatePaymentMethod".into(),
                message: "This payment method has already been added".into(),
                field: None,
            }));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let saved = SavedPaymentMethod { id, ..candidate };
        let data = serde_json::to_value(&saved)
            .map_err(|e| GatewayError::UnexpectedResponse(e.to_string()))?;
        methods.push(saved);

        Ok(SubmitResponse::accepted(Some(data)))
    }

    async fn update_payment_method(
        &self,
        id: u64,
        fields: &BTreeMap<String, String>,
    ) -> Result<SubmitResponse, GatewayError> {
        self.record_call().await?;

        let mut methods = self.methods.lock().await;
        let Some(saved) = methods.iter_mut().find(|m| m.id == id) else {
            return Ok(SubmitResponse::rejected(ApiError {
                code: "PaymentMethodNotFound".into(),
                message: "Payment method not found".into(),
                field: None,
            }));
        };

        saved.fields = to_saved_fields(fields);
        let data = serde_json::to_value(&*saved)
            .map_err(|e| GatewayError::UnexpectedResponse(e.to_string()))?;
        Ok(SubmitResponse::accepted(Some(data)))
    }

    async fn list_payment_methods(&self) -> Result<Vec<SavedPaymentMethod>, GatewayError> {
        Ok(self.methods.lock().await.clone())
    }
}
