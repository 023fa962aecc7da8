//! Application layer
//!
//! Orchestrates use cases and coordinates domain objects.

pub mod commands;
pub mod dto;
pub mod export;

pub use commands::{FormService, ResponseService};
pub use dto::*;
