//! Ports module (Hexagonal Architecture)
//!
//! Use case traits offered to hosts, and the collaborators a submission
//! talks to.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
