//! vidcoord common utilities
//!
//! Shared infrastructure for all vidcoord crates:
//! - Error types and result aliases
//! - Wall clock and frame-index estimation
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
