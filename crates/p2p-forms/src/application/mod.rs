//! Application layer
//!
//! Orchestrates submissions and coordinates the form aggregates with their
//! collaborators.

pub mod commands;
pub mod dto;

pub use commands::{AdService, PaymentMethodService};
pub use dto::*;
