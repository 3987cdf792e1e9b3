//! Infrastructure layer
//!
//! In-memory collaborators for hosts without a backend, demos and tests.

pub mod gateways;

pub use gateways::*;
