//! Infrastructure layer
//!
//! Adapters behind the outbound ports.

pub mod persistence;

pub use persistence::*;
