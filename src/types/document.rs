//! Document kinds and rendered output

use std::path::{Path, PathBuf};

/// The two SQL documents synced from an upstream release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentKind {
    /// Config service database (`apolloconfigdb.sql`)
    Config,

    /// Portal database (`apolloportaldb.sql`), carries the config row rule
    Portal,
}

impl DocumentKind {
    /// Every document, in processing order
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Config, DocumentKind::Portal];

    /// Label used when the upstream SQL file is missing
    pub fn source_label(&self) -> &'static str {
        match self {
            DocumentKind::Config => "Apollo config SQL",
            DocumentKind::Portal => "Apollo portal SQL",
        }
    }

    /// Label used when the local overlay file is missing
    pub fn overlay_label(&self) -> &'static str {
        match self {
            DocumentKind::Config => "Quick-start config sample overlay",
            DocumentKind::Portal => "Quick-start portal sample overlay",
        }
    }

    /// Whether the member-only environments row must be forced
    pub fn enforces_config_row(&self) -> bool {
        matches!(self, DocumentKind::Portal)
    }
}

/// A document rendered in memory, before or after being written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub kind: DocumentKind,

    /// Absolute output path under the quick-start root
    pub output_path: PathBuf,

    /// Expected file content
    pub content: String,

    /// Overlay text exactly as read from disk
    pub overlay: String,
}

impl RenderedDocument {
    /// File name used in error messages
    pub fn name(&self) -> String {
        display_name(&self.output_path)
    }
}

/// Final path component as a lossy string, or the whole path if there is none
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
