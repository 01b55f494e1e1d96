//! Structured logging facility for aggtree
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! Tree navigation itself only emits `tracing::debug!` events. The operation
//! macros mark rendering boundaries, which are the only places where a
//! caller hands control to the core for a measurable amount of work.
//!
//! # Usage
//!
//! ```rust
//! use aggtree_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
