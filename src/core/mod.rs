//! core
//!
//! Core domain types and small self-contained utilities.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Account, CommandPath
//! - [`bytesize`] - Human-readable byte-size formatting
//! - [`tz`] - UTC-offset to IANA zone-name heuristic
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Utilities are pure functions with no I/O

pub mod bytesize;
pub mod types;
pub mod tz;
