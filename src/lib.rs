//! gogcli - A scriptable CLI for Google Workspace APIs
//!
//! gogcli is a single-binary tool that exposes Gmail, Calendar, Drive, Sheets,
//! Slides, Tasks, and Groups as uniform subcommands with consistent
//! text/TSV/JSON output, dry-run support, and machine-readable exit codes.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`engine`] - Execution envelope: context, command gate, dry-run,
//!   pagination, exit codes
//! - [`workspace`] - Google REST API access behind a narrow transport seam
//! - [`auth`] - Bearer-token resolution
//! - [`store`] - Per-account config directory and file storage
//! - [`mail`] - RFC822 message construction and HTML stripping
//! - [`core`] - Strong types and small formatting utilities
//! - [`ui`] - Output rendering and prompts
//!
//! # Envelope Invariants
//!
//! Every command handler honors the execution envelope:
//!
//! 1. Dry-run is checked before any network call or credential access
//! 2. Destructive operations confirm unless forced or non-interactive
//! 3. Pagination preserves server order and stops on the first error
//! 4. Exit codes come from a single stable table

pub mod auth;
pub mod cli;
pub mod core;
pub mod engine;
pub mod mail;
pub mod store;
pub mod ui;
pub mod workspace;
