//! Domain module
//!
//! Registry, schema compiler, validators and the form aggregates.

pub mod aggregates;
pub mod events;
pub mod registry;
pub mod schema;
pub mod services;
pub mod validation;
pub mod value_objects;

pub use aggregates::*;
pub use events::*;
pub use value_objects::*;
