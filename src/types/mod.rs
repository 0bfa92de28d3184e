//! Core type definitions for relsync

mod document;
mod error;

pub use document::{display_name, DocumentKind, RenderedDocument};
pub use error::SyncError;
