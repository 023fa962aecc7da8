//! Domain module
//!
//! Field types, values, form schemas and responses, plus the pure
//! validation services that operate on them.

pub mod aggregates;
pub mod events;
pub mod services;
pub mod value_objects;

pub use aggregates::*;
pub use events::*;
pub use value_objects::*;
