//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output-mode resolution and rendering
//! - [`prompts`] - Interactive prompts and confirmations
//!
//! # Design
//!
//! All output and prompts go through this module to ensure consistent
//! formatting and proper handling of interactive vs non-interactive modes.

pub mod output;
pub mod prompts;
