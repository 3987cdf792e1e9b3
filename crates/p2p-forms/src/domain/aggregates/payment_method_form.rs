//! Payment Method Form Aggregate
//!
//! Dynamic form whose fields depend on the selected category. Used both to
//! add a payment method and, with the category fixed, to edit a saved one.

use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::{FormPhase, SubmissionOutcome, SubmissionStatus};
use crate::domain::events::{DomainEvent, FormKind, FormSnapshot, Notifier};
use crate::domain::schema::{Schema, METHOD_FIELD, NOTES_FIELD, NOTES_MAX_CHARS};
use crate::domain::validation::{ErrorKind, ValidationResult};
use crate::domain::value_objects::{
    FormId, FormNotice, PaymentMethodCategory, SavedPaymentMethod,
};
use crate::error::{FormError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { payment_method_id: u64 },
}

/// Values handed to the collaborator when a submission starts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentMethodDraft {
    /// Set when updating a saved method
    pub payment_method_id: Option<u64>,
    /// Selector value; a registry key, or a saved method's own key when
    /// editing one of an unregistered category
    pub method: String,
    /// Category fields, plus trimmed instructions when not blank
    pub fields: BTreeMap<String, String>,
}

/// Payment method form aggregate root
#[derive(Debug)]
pub struct PaymentMethodForm {
    id: FormId,
    mode: FormMode,
    phase: FormPhase,
    schema: Schema,
    values: BTreeMap<String, String>,
    notes_length: usize,
    validation: ValidationResult,
    notice: Option<FormNotice>,
    notifier: Notifier<BTreeMap<String, String>>,
    events: Vec<DomainEvent>,
}

impl PaymentMethodForm {
    /// Open an empty add form; no category selected yet
    pub fn open() -> Self {
        let schema = Schema::base();
        let values = blank_values(&schema, "", String::new());
        let mut form = Self::assemble(FormMode::Add, FormPhase::AwaitingCategory, schema, values);
        form.raise_opened(FormKind::AddPaymentMethod);
        form
    }

    /// Open an edit form seeded from a saved payment method. The method is
    /// fixed to the saved one; saved details the registry does not define
    /// become required inputs of their own.
    pub fn edit(saved: &SavedPaymentMethod) -> Self {
        let schema = Schema::for_saved(saved);
        let notes = saved.instructions().unwrap_or_default().to_string();
        let mut values = blank_values(&schema, &saved.method, notes);
        for name in schema.dynamic_field_names() {
            if let Some(value) = saved.field(name) {
                values.insert(name.to_string(), value.to_string());
            }
        }

        let mode = FormMode::Edit { payment_method_id: saved.id };
        let mut form = Self::assemble(mode, FormPhase::Editing, schema, values);
        form.raise_opened(FormKind::EditPaymentMethod);
        form
    }

    fn assemble(
        mode: FormMode,
        phase: FormPhase,
        schema: Schema,
        values: BTreeMap<String, String>,
    ) -> Self {
        let id = FormId::new();
        let validation = schema.validate(&values);
        let notes_length = values.get(NOTES_FIELD).map_or(0, |n| n.chars().count());
        let notifier = Notifier::new(FormSnapshot {
            form_id: id.clone(),
            revision: 0,
            category: schema.method_key().map(str::to_string),
            is_valid: validation.is_valid(),
            form_data: values.clone(),
        });

        Self {
            id,
            mode,
            phase,
            schema,
            values,
            notes_length,
            validation,
            notice: None,
            notifier,
            events: vec![],
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &FormId { &self.id }
    pub fn mode(&self) -> FormMode { self.mode }
    pub fn phase(&self) -> FormPhase { self.phase }
    pub fn category(&self) -> Option<PaymentMethodCategory> { self.schema.category() }
    pub fn method(&self) -> Option<&str> { self.schema.method_key() }
    pub fn schema(&self) -> &Schema { &self.schema }
    pub fn values(&self) -> &BTreeMap<String, String> { &self.values }
    pub fn value(&self, name: &str) -> Option<&str> { self.values.get(name).map(String::as_str) }
    pub fn notes_length(&self) -> usize { self.notes_length }
    pub fn validation(&self) -> &ValidationResult { &self.validation }
    pub fn is_valid(&self) -> bool { self.validation.is_valid() }
    pub fn notice(&self) -> Option<&FormNotice> { self.notice.as_ref() }

    /// Characters left before the notes cap
    pub fn notes_remaining(&self) -> usize {
        NOTES_MAX_CHARS.saturating_sub(self.notes_length)
    }

    /// Follow validity and values of this form
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<FormSnapshot<BTreeMap<String, String>>> {
        self.notifier.subscribe()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Switch category. Field values are reset to blanks for the new
    /// field-set; notes are kept. Re-selecting the current category changes
    /// nothing.
    pub fn select_category(&mut self, category_key: &str) -> Result<()> {
        self.phase.ensure_editable().inspect_err(|e| self.log_rejected("select_category", e))?;

        if self.schema.method_key() == Some(category_key) {
            debug!(form_id = %self.id, category = category_key, "category already selected");
            return Ok(());
        }

        let category = PaymentMethodCategory::from_key(category_key)
            .ok_or_else(|| FormError::UnknownCategory(category_key.to_string()))?;

        if let FormMode::Edit { .. } = self.mode {
            let err = FormError::CategoryLocked;
            self.log_rejected("select_category", &err);
            return Err(err);
        }

        let notes = self.values.remove(NOTES_FIELD).unwrap_or_default();
        self.schema = Schema::for_category(category);
        self.values = blank_values(&self.schema, category.key(), notes);
        self.phase = FormPhase::Editing;
        self.notice = None;

        debug!(form_id = %self.id, %category, fields = self.values.len(), "category selected");
        self.events.push(DomainEvent::CategorySelected {
            form_id: self.id.clone(),
            category: category.key().to_string(),
        });

        self.revalidate();
        Ok(())
    }

    /// Set one field. Editing the selector is a category change.
    pub fn edit_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        if name == METHOD_FIELD {
            return self.select_category(&value);
        }

        self.phase.ensure_editable().inspect_err(|e| self.log_rejected("edit_field", e))?;

        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        if name == NOTES_FIELD {
            self.notes_length = value.chars().count();
        }
        *slot = value;
        self.notice = None;

        self.revalidate();
        Ok(())
    }

    /// Enter `Submitting` and hand out the values to send. Only one
    /// submission may be pending at a time.
    pub fn begin_submission(&mut self) -> Result<PaymentMethodDraft> {
        let method = match self.phase {
            FormPhase::Submitting => Err(FormError::SubmissionInProgress),
            FormPhase::Closed => Err(FormError::NotOpen),
            FormPhase::AwaitingCategory => Err(FormError::CategoryNotSelected),
            FormPhase::Editing => self
                .schema
                .method_key()
                .map(str::to_string)
                .ok_or(FormError::CategoryNotSelected),
        }
        .inspect_err(|e| self.log_rejected("submit", e))?;

        if !self.is_valid() {
            let err = FormError::InvalidForm;
            self.log_rejected("submit", &err);
            return Err(err);
        }

        let mut fields: BTreeMap<String, String> = self
            .schema
            .dynamic_field_names()
            .map(|name| (name.to_string(), self.value(name).unwrap_or_default().to_string()))
            .collect();

        let notes = self.value(NOTES_FIELD).unwrap_or_default().trim();
        if !notes.is_empty() {
            fields.insert(NOTES_FIELD.to_string(), notes.to_string());
        }

        self.phase = FormPhase::Submitting;
        self.notice = None;
        self.events.push(DomainEvent::SubmissionStarted {
            form_id: self.id.clone(),
            started_at: Utc::now(),
        });
        debug!(form_id = %self.id, %method, "submission started");

        Ok(PaymentMethodDraft {
            payment_method_id: match self.mode {
                FormMode::Add => None,
                FormMode::Edit { payment_method_id } => Some(payment_method_id),
            },
            method,
            fields,
        })
    }

    /// Resume after the collaborator answered. Success closes the form;
    /// anything else returns it to editing with values untouched.
    pub fn complete_submission(&mut self, outcome: SubmissionOutcome) -> Result<SubmissionStatus> {
        if self.phase != FormPhase::Submitting {
            return Err(FormError::NotSubmitting);
        }

        let status = match outcome {
            SubmissionOutcome::Accepted { data } => {
                self.phase = FormPhase::Closed;
                self.events.push(DomainEvent::SubmissionSucceeded {
                    form_id: self.id.clone(),
                    completed_at: Utc::now(),
                });
                self.events.push(DomainEvent::Closed {
                    form_id: self.id.clone(),
                    submitted: true,
                });
                info!(form_id = %self.id, "payment method saved");
                return Ok(SubmissionStatus::Accepted { data });
            }
            SubmissionOutcome::Rejected { code, message, field } => {
                self.phase = FormPhase::Editing;
                self.record_failure(&code);
                warn!(form_id = %self.id, %code, "payment method rejected");

                match field.filter(|f| f != METHOD_FIELD && self.values.contains_key(f)) {
                    Some(field) => {
                        self.validation.reject(field.clone(), ErrorKind::Submission, message.clone());
                        SubmissionStatus::Rejected { field: Some(field), message }
                    }
                    None => {
                        self.notice = Some(FormNotice::error(self.failure_title(), message.clone()));
                        SubmissionStatus::Rejected { field: None, message }
                    }
                }
            }
            SubmissionOutcome::Failed { reason } => {
                self.phase = FormPhase::Editing;
                self.record_failure(&reason);
                warn!(form_id = %self.id, %reason, "payment method submission failed");

                let notice = FormNotice::unexpected(self.failure_title());
                self.notice = Some(notice.clone());
                SubmissionStatus::Failed { notice }
            }
        };

        self.publish();
        Ok(status)
    }

    /// Cancel the form
    pub fn close(&mut self) -> Result<()> {
        match self.phase {
            FormPhase::Closed => Ok(()),
            FormPhase::Submitting => Err(FormError::SubmissionInProgress),
            FormPhase::AwaitingCategory | FormPhase::Editing => {
                self.phase = FormPhase::Closed;
                self.events.push(DomainEvent::Closed {
                    form_id: self.id.clone(),
                    submitted: false,
                });
                debug!(form_id = %self.id, "form cancelled");
                Ok(())
            }
        }
    }

    /// Get and clear accumulated domain events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn revalidate(&mut self) {
        self.validation = self.schema.validate(&self.values);
        self.publish();
    }

    fn publish(&self) {
        self.notifier.publish(
            self.schema.method_key().map(str::to_string),
            self.validation.is_valid(),
            self.values.clone(),
        );
    }

    fn failure_title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Failed to add payment method",
            FormMode::Edit { .. } => "Failed to update payment method",
        }
    }

    fn record_failure(&mut self, reason: &str) {
        self.events.push(DomainEvent::SubmissionFailed {
            form_id: self.id.clone(),
            reason: reason.to_string(),
            failed_at: Utc::now(),
        });
    }

    fn raise_opened(&mut self, kind: FormKind) {
        self.events.push(DomainEvent::Opened {
            form_id: self.id.clone(),
            kind,
            opened_at: Utc::now(),
        });
    }

    fn log_rejected(&self, transition: &str, err: &FormError) {
        warn!(form_id = %self.id, transition, error = %err, "transition rejected");
    }
}

fn blank_values(schema: &Schema, method: &str, notes: String) -> BTreeMap<String, String> {
    let mut values: BTreeMap<String, String> =
        schema.field_names().map(|name| (name.to_string(), String::new())).collect();
    values.insert(METHOD_FIELD.to_string(), method.to_string());
    values.insert(NOTES_FIELD.to_string(), notes);
    values
}
