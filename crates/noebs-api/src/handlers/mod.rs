//! API Handlers
//!
//! Request handlers for all API endpoints.

pub mod docs;
pub mod health;
pub mod transaction;

pub use health::*;
