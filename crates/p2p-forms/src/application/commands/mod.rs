//! Command handlers
//!
//! Application services that drive a form submission through the outbound
//! ports. The form is put into `Submitting` before the collaborator is
//! awaited, so a second submit on the same form fails without a call.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::dto::{outcome_of, CreateAdPayload};
use crate::config::AdDefaults;
use crate::domain::aggregates::{
    AdDetailsForm, PaymentMethodForm, PaymentMethodSelection, SubmissionStatus,
};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::SavedPaymentMethod;
use crate::error::ServiceError;
use crate::ports::inbound::{AdUseCases, PaymentMethodUseCases};
use crate::ports::outbound::{AdGateway, EventPublisher, PaymentMethodGateway};

/// Payment method application service
pub struct PaymentMethodService {
    gateway: Arc<dyn PaymentMethodGateway>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl PaymentMethodService {
    pub fn new(
        gateway: Arc<dyn PaymentMethodGateway>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            gateway,
            event_publisher,
        }
    }
}

#[async_trait]
impl PaymentMethodUseCases for PaymentMethodService {
    async fn submit(&self, form: &mut PaymentMethodForm) -> Result<SubmissionStatus, ServiceError> {
        let draft = form.begin_submission()?;
        publish_events(self.event_publisher.as_ref(), form.take_events()).await;

        let result = match draft.payment_method_id {
            Some(id) => {
                debug!(payment_method_id = id, method = %draft.method, "updating payment method");
                self.gateway.update_payment_method(id, &draft.fields).await
            }
            None => {
                debug!(method = %draft.method, "adding payment method");
                self.gateway.add_payment_method(&draft.method, &draft.fields).await
            }
        };

        let status = form.complete_submission(outcome_of(result))?;
        publish_events(self.event_publisher.as_ref(), form.take_events()).await;
        Ok(status)
    }

    async fn open_edit(&self, payment_method_id: u64) -> Result<PaymentMethodForm, ServiceError> {
        let saved = self
            .saved_methods()
            .await?
            .into_iter()
            .find(|m| m.id == payment_method_id)
            .ok_or(ServiceError::NotFound(payment_method_id))?;

        let mut form = PaymentMethodForm::edit(&saved);
        publish_events(self.event_publisher.as_ref(), form.take_events()).await;
        Ok(form)
    }

    async fn selection(&self) -> Result<PaymentMethodSelection, ServiceError> {
        Ok(PaymentMethodSelection::new(self.saved_methods().await?))
    }

    async fn saved_methods(&self) -> Result<Vec<SavedPaymentMethod>, ServiceError> {
        let methods = self.gateway.list_payment_methods().await?;
        debug!(count = methods.len(), "loaded saved payment methods");
        Ok(methods)
    }
}

/// Ad creation application service
pub struct AdService {
    gateway: Arc<dyn AdGateway>,
    event_publisher: Arc<dyn EventPublisher>,
    defaults: AdDefaults,
}

impl AdService {
    pub fn new(
        gateway: Arc<dyn AdGateway>,
        event_publisher: Arc<dyn EventPublisher>,
        defaults: AdDefaults,
    ) -> Self {
        Self {
            gateway,
            event_publisher,
            defaults,
        }
    }
}

#[async_trait]
impl AdUseCases for AdService {
    async fn submit(
        &self,
        form: &mut AdDetailsForm,
        selection: &PaymentMethodSelection,
        description: &str,
    ) -> Result<SubmissionStatus, ServiceError> {
        let draft = form.begin_submission(selection)?;
        publish_events(self.event_publisher.as_ref(), form.take_events()).await;

        let payload = CreateAdPayload::new(&draft, description, &self.defaults);
        let result = self.gateway.create_ad(&payload).await;

        let status = form.complete_submission(outcome_of(result))?;
        publish_events(self.event_publisher.as_ref(), form.take_events()).await;
        if status.is_accepted() {
            info!(trade_type = %draft.trade_type, methods = ?draft.payment_method_names, "ad submitted");
        }
        Ok(status)
    }
}

/// Event delivery never fails a submission
async fn publish_events(publisher: &dyn EventPublisher, events: Vec<DomainEvent>) {
    if events.is_empty() {
        return;
    }
    if let Err(e) = publisher.publish(events).await {
        warn!(error = %e, "failed to publish form events");
    }
}
