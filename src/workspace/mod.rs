//! workspace
//!
//! Google Workspace API clients.
//!
//! # Architecture
//!
//! Everything talks to Google through the [`Transport`] trait: one
//! authenticated HTTP surface (`rest::GoogleClient`) in production, a
//! scripted replacement (`mock::MockTransport`) in tests. Per-service
//! structs (`Gmail`, `Calendar`, ...) are thin adapters that know URLs and
//! payload shapes but nothing about credentials.
//!
//! A [`Session`] is the only place credentials are read. Command handlers
//! call [`Session::connect`] after the dry-run decision has been made, so a
//! dry-run never touches a token.

pub mod calendar;
pub mod common;
pub mod drive;
pub mod gmail;
pub mod groups;
pub mod mock;
pub mod rest;
pub mod sheets;
pub mod slides;
pub mod tasks;
pub mod transport;

pub use transport::{ApiError, Transport};

use std::sync::Arc;

use crate::auth;
use crate::engine::Context;

/// Implements the shared constructor for a service adapter.
macro_rules! service_wrapper {
    ($name:ident) => {
        impl $name {
            pub fn new(transport: std::sync::Arc<dyn $crate::workspace::Transport>) -> Self {
                Self { transport }
            }
        }
    };
}
pub(crate) use service_wrapper;

/// An authenticated connection to Google Workspace.
pub struct Session {
    transport: Arc<dyn Transport>,
}

impl Session {
    /// Open a session for the context's account.
    ///
    /// This is the single credential-access point: it resolves a bearer
    /// token and builds the HTTP transport. Callers must decide dry-run
    /// before calling this.
    pub fn connect(ctx: &Context) -> Result<Self, ApiError> {
        let token = auth::bearer_token(ctx)?;
        let client = rest::GoogleClient::new(token)?;
        Ok(Self {
            transport: Arc::new(client),
        })
    }

    /// Build a session over an arbitrary transport, for tests.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn gmail(&self) -> gmail::Gmail {
        gmail::Gmail::new(self.transport.clone())
    }

    pub fn calendar(&self) -> calendar::Calendar {
        calendar::Calendar::new(self.transport.clone())
    }

    pub fn drive(&self) -> drive::Drive {
        drive::Drive::new(self.transport.clone())
    }

    pub fn sheets(&self) -> sheets::Sheets {
        sheets::Sheets::new(self.transport.clone())
    }

    pub fn slides(&self) -> slides::Slides {
        slides::Slides::new(self.transport.clone())
    }

    pub fn tasks(&self) -> tasks::Tasks {
        tasks::Tasks::new(self.transport.clone())
    }

    pub fn groups(&self) -> groups::Groups {
        groups::Groups::new(self.transport.clone())
    }
}
