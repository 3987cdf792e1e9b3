//! Inbound ports (Use case traits)

use async_trait::async_trait;

use crate::domain::aggregates::{
    AdDetailsForm, PaymentMethodForm, PaymentMethodSelection, SubmissionStatus,
};
use crate::domain::value_objects::SavedPaymentMethod;
use crate::error::ServiceError;

/// Payment method form use cases
#[async_trait]
pub trait PaymentMethodUseCases: Send + Sync {
    /// Submit an add or edit form. Collaborator failures come back as a
    /// non-accepted status; `Err` means the form refused to submit.
    async fn submit(&self, form: &mut PaymentMethodForm) -> Result<SubmissionStatus, ServiceError>;

    /// Open an edit form for a saved method
    async fn open_edit(&self, payment_method_id: u64) -> Result<PaymentMethodForm, ServiceError>;

    /// Saved methods, ready for a [`PaymentMethodSelection`]
    async fn selection(&self) -> Result<PaymentMethodSelection, ServiceError>;

    /// Saved methods as returned by the collaborator
    async fn saved_methods(&self) -> Result<Vec<SavedPaymentMethod>, ServiceError>;
}

/// Ad creation use cases
#[async_trait]
pub trait AdUseCases: Send + Sync {
    async fn submit(
        &self,
        form: &mut AdDetailsForm,
        selection: &PaymentMethodSelection,
        description: &str,
    ) -> Result<SubmissionStatus, ServiceError>;
}
