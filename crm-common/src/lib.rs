//! # CRM Common Library
//!
//! Shared code for all CRM services including:
//! - Common error types
//! - Event bus for cross-component notifications
//! - Configuration loading

pub mod config;
pub mod error;
pub mod events;

pub use error::{Error, Result};
pub use events::EventBus;
