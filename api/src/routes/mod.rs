//! API Routes

pub mod field_types;
pub mod forms;
pub mod health;
pub mod responses;
pub mod stats;
