//! Aggregates module
//!
//! Form sessions. Each owns its state exclusively and runs every transition
//! to completion before accepting the next.

pub mod ad_details_form;
pub mod payment_method_form;
pub mod payment_selection;

pub use ad_details_form::{AdDetailsForm, AdDraft};
pub use payment_method_form::{FormMode, PaymentMethodDraft, PaymentMethodForm};
pub use payment_selection::PaymentMethodSelection;

use serde::Serialize;

use crate::domain::value_objects::FormNotice;
use crate::error::FormError;

/// Lifecycle of a form session
///
/// `Closed <- Submitting <- Editing <- AwaitingCategory`, with `Submitting`
/// falling back to `Editing` when the collaborator rejects or fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    /// Open, no category chosen yet
    AwaitingCategory,
    /// Open with a category; fields editable
    Editing,
    /// Waiting for the collaborator; every other transition is rejected
    Submitting,
    /// Submitted or cancelled
    Closed,
}

impl FormPhase {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::AwaitingCategory | Self::Editing)
    }

    /// Gate for transitions that mutate field values
    pub(crate) fn ensure_editable(&self) -> Result<(), FormError> {
        match self {
            Self::AwaitingCategory | Self::Editing => Ok(()),
            Self::Submitting => Err(FormError::SubmissionInProgress),
            Self::Closed => Err(FormError::NotOpen),
        }
    }
}

/// What the collaborator said about one submission
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionOutcome {
    Accepted { data: Option<serde_json::Value> },
    /// Structured rejection; carries the first reported error
    Rejected {
        code: String,
        message: String,
        field: Option<String>,
    },
    /// The call itself failed
    Failed { reason: String },
}

/// Result of a submission as seen by the host
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Form closed
    Accepted { data: Option<serde_json::Value> },
    /// Form back to editing; message anchored to `field` when it names a
    /// field of the form, otherwise shown as a form-level notice
    Rejected { field: Option<String>, message: String },
    /// Form back to editing with a generic notice
    Failed { notice: FormNotice },
}

impl SubmissionStatus {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
