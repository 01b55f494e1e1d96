//! Core types shared across the aggtree facilities
//!
//! This crate provides the canonical schema constants used by the logging
//! macros and the error facility of `aggtree-core`, so that field keys and
//! event names stay identical wherever they are emitted or asserted on.

pub mod schema;
