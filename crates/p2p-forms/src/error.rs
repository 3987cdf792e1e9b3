//! Error types for the form engine

use thiserror::Error;

/// A form transition that was rejected.
///
/// Validation failures are not errors: they are carried in
/// [`ValidationResult`](crate::ValidationResult) and rendered next to the
/// field. `FormError` is returned when the host asks for something the
/// current state does not allow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Form was closed (submitted or cancelled)
    #[error("form is not open")]
    NotOpen,

    /// Another submission is awaiting its outcome
    #[error("a submission is already in progress")]
    SubmissionInProgress,

    /// Submit requested while the form has field errors
    #[error("form has validation errors")]
    InvalidForm,

    /// Category key not present in the registry
    #[error("unknown payment method category: {0}")]
    UnknownCategory(String),

    /// Field name outside the current field-set
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Submit requested before a category was chosen
    #[error("no payment method category selected")]
    CategoryNotSelected,

    /// Edit forms cannot switch category
    #[error("category is fixed while editing a payment method")]
    CategoryLocked,

    /// Saved payment method id not offered to the selection
    #[error("unknown payment method id: {0}")]
    UnknownPaymentMethod(u64),

    /// Ads need at least one accepted payment method
    #[error("select at least one payment method for your ad")]
    NoPaymentMethodSelected,

    /// Outcome delivered while no submission was pending
    #[error("no submission in progress")]
    NotSubmitting,
}

/// Failure of an outbound collaborator call itself, as opposed to a
/// structured rejection in the response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Error returned by the application services
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("payment method not found: {0}")]
    NotFound(u64),
}

/// Result type for form transitions
pub type Result<T> = std::result::Result<T, FormError>;
