//! Relative file layout of the upstream and quick-start repositories

use crate::types::{DocumentKind, SyncError};
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Where each input and output lives, relative to its repository root
///
/// Upstream paths are relative to the release checkout; overlay and output
/// paths are relative to the quick-start root. A layout file only needs the
/// keys it overrides:
///
/// ```toml
/// output_portal = "db/apolloportaldb.sql"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    pub upstream_config: PathBuf,
    pub upstream_portal: PathBuf,
    pub output_config: PathBuf,
    pub output_portal: PathBuf,
    pub overlay_config: PathBuf,
    pub overlay_portal: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            upstream_config: PathBuf::from("scripts/sql/profiles/mysql-default/apolloconfigdb.sql"),
            upstream_portal: PathBuf::from("scripts/sql/profiles/mysql-default/apolloportaldb.sql"),
            output_config: PathBuf::from("sql/apolloconfigdb.sql"),
            output_portal: PathBuf::from("sql/apolloportaldb.sql"),
            overlay_config: PathBuf::from("sql/overlays/apolloconfigdb-sample-data.sql"),
            overlay_portal: PathBuf::from("sql/overlays/apolloportaldb-sample-data.sql"),
        }
    }
}

impl Layout {
    /// Parse a layout from TOML text, filling missing keys with defaults
    pub fn from_toml_str(text: &str) -> Result<Self, SyncError> {
        let layout: Layout = toml::from_str(text)
            .map_err(|e| SyncError::Config(format!("Invalid layout file: {}", e)))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load a layout file from disk
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = fs::read_to_string(path).map_err(|source| SyncError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Upstream SQL path for a document
    pub fn upstream(&self, kind: DocumentKind) -> &Path {
        match kind {
            DocumentKind::Config => &self.upstream_config,
            DocumentKind::Portal => &self.upstream_portal,
        }
    }

    /// Sample-data overlay path for a document
    pub fn overlay(&self, kind: DocumentKind) -> &Path {
        match kind {
            DocumentKind::Config => &self.overlay_config,
            DocumentKind::Portal => &self.overlay_portal,
        }
    }

    /// Synced output path for a document
    pub fn output(&self, kind: DocumentKind) -> &Path {
        match kind {
            DocumentKind::Config => &self.output_config,
            DocumentKind::Portal => &self.output_portal,
        }
    }

    /// Every path must stay inside its repository root
    pub fn validate(&self) -> Result<(), SyncError> {
        for kind in DocumentKind::ALL {
            for path in [self.upstream(kind), self.overlay(kind), self.output(kind)] {
                check_relative(path)?;
            }
        }

        let outputs = DocumentKind::ALL.map(|kind| normalize(self.output(kind)));
        let overlays = DocumentKind::ALL.map(|kind| normalize(self.overlay(kind)));

        if outputs[0] == outputs[1] {
            return Err(SyncError::Config(format!(
                "Config and portal outputs cannot share a path: {}",
                outputs[0].display()
            )));
        }

        // Writing an output over an overlay would destroy the overlay
        for output in &outputs {
            if overlays.contains(output) {
                return Err(SyncError::Config(format!(
                    "Output path cannot be an overlay path: {}",
                    output.display()
                )));
            }
        }

        Ok(())
    }
}

/// Drop `.` components so `./sql/a.sql` and `sql/a.sql` compare equal
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn check_relative(path: &Path) -> Result<(), SyncError> {
    if path.as_os_str().is_empty() {
        return Err(SyncError::Config("Layout paths cannot be empty".to_string()));
    }

    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(SyncError::Config(format!(
            "Layout path must be relative and stay inside the repository: {}",
            path.display()
        )));
    }

    Ok(())
}
