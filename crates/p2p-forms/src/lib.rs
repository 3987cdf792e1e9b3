//! P2P Trade Form Engine
//!
//! Dynamic form validation for the peer-to-peer trading front end: adding and
//! editing payment methods, and entering trade-ad details.
//!
//! ## Architecture
//!
//! - **Domain Layer**: field-set registry, schema compiler, cross-field
//!   validator, form aggregates and their notifications
//! - **Application Layer**: async services that drive a submission through
//!   the outbound ports
//! - **Ports Layer**: use case traits and the submit collaborators
//! - **Infrastructure Layer**: in-memory gateways
//!
//! ## Forms
//!
//! - **PaymentMethodForm**: category-driven dynamic fields (add and edit)
//! - **AdDetailsForm**: trade type plus live-validated order amounts
//! - **PaymentMethodSelection**: which saved methods an ad accepts

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

// Re-exports for convenience
pub use application::{AdService, PaymentMethodService};
pub use application::dto::{ApiError, CreateAdPayload, SubmitResponse};
pub use config::{AdDefaults, ConfigError, FormsConfig};
pub use domain::aggregates::{
    AdDetailsForm, AdDraft, FormMode, FormPhase, PaymentMethodDraft, PaymentMethodForm,
    PaymentMethodSelection, SubmissionOutcome, SubmissionStatus,
};
pub use domain::events::{DomainEvent, FormSnapshot, Notifier};
pub use domain::registry;
pub use domain::schema::{compile, FieldRule, Rule, Schema};
pub use domain::services::{
    category_display_name, display_details, mask_account, validate_ad_amounts, AdField,
    AmountValidation, MethodDisplay,
};
pub use domain::validation::{ErrorKind, FieldError, ValidationResult};
pub use domain::value_objects::{
    AdFormAmounts, AdFormData, Amount, FieldDefinition, FieldKind, FieldSetDefinition, FormId,
    FormNotice, NoticeKind, PaymentMethodCategory, SavedPaymentMethod, TradeType,
};
pub use error::{FormError, GatewayError, Result, ServiceError};
pub use infrastructure::{
    InMemoryAdGateway, InMemoryEventPublisher, InMemoryPaymentMethodGateway, TracingEventPublisher,
};
pub use ports::inbound::{AdUseCases, PaymentMethodUseCases};
pub use ports::outbound::{AdGateway, EventPublisher, PaymentMethodGateway};
