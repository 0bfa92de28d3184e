//! # relsync - Release SQL sync for quick-start repositories
//!
//! Copies the config and portal database scripts from an upstream release
//! checkout, splices local sample-data overlays in front of the SQL footer,
//! pins the portal's member-only environments to `dev`, and validates the
//! result before reporting success.

// Module declarations
pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod render;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use commands::sync::{sync, SyncReport};
pub use config::{Config, Layout};
pub use types::{DocumentKind, RenderedDocument, SyncError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
