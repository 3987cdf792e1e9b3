//! Domain Events
//!
//! Events raised by form aggregates, and the snapshot channel hosts use to
//! follow a form's validity.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::FormId;

pub mod notifier;

pub use notifier::{FormSnapshot, Notifier};

/// Which form an event came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    AddPaymentMethod,
    EditPaymentMethod,
    AdDetails,
}

/// Lifecycle events of a form session
#[derive(Clone, Debug)]
pub enum DomainEvent {
    Opened {
        form_id: FormId,
        kind: FormKind,
        opened_at: DateTime<Utc>,
    },

    CategorySelected {
        form_id: FormId,
        category: String,
    },

    SubmissionStarted {
        form_id: FormId,
        started_at: DateTime<Utc>,
    },

    SubmissionSucceeded {
        form_id: FormId,
        completed_at: DateTime<Utc>,
    },

    SubmissionFailed {
        form_id: FormId,
        reason: String,
        failed_at: DateTime<Utc>,
    },

    Closed {
        form_id: FormId,
        submitted: bool,
    },
}

impl DomainEvent {
    pub fn form_id(&self) -> &FormId {
        match self {
            Self::Opened { form_id, .. }
            | Self::CategorySelected { form_id, .. }
            | Self::SubmissionStarted { form_id, .. }
            | Self::SubmissionSucceeded { form_id, .. }
            | Self::SubmissionFailed { form_id, .. }
            | Self::Closed { form_id, .. } => form_id,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Opened { .. } => "form.opened",
            Self::CategorySelected { .. } => "form.category_selected",
            Self::SubmissionStarted { .. } => "form.submission_started",
            Self::SubmissionSucceeded { .. } => "form.submission_succeeded",
            Self::SubmissionFailed { .. } => "form.submission_failed",
            Self::Closed { .. } => "form.closed",
        }
    }
}
