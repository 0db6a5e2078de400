//! # Core Module
//!
//! Configuration, typed errors, and the user-facing reply texts.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add error module with store/transport error types
//! - 1.0.0: Initial creation with config and replies modules

pub mod config;
pub mod error;
pub mod replies;

// Re-export commonly used items
pub use config::Config;
pub use error::{StoreError, TransportError};
