//! Collaborator implementations

pub mod ads;
pub mod events;
pub mod payment_methods;

pub use ads::InMemoryAdGateway;
pub use events::{InMemoryEventPublisher, TracingEventPublisher};
pub use payment_methods::InMemoryPaymentMethodGateway;
