//! Main sync command

use crate::diff::assert_same_content;
use crate::executor::{read_text, require_file, write_file_atomic};
use crate::render::{enforce_config_value, render, validate, ConfigRowRule};
use crate::types::{display_name, DocumentKind, RenderedDocument, SyncError};
use crate::ui;
use crate::Config;
use indicatif::HumanBytes;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Label used when an output is missing at validation time
pub const SYNCED_OUTPUT_LABEL: &str = "Synced SQL output";

/// One synced or validated output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedOutput {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub check_only: bool,
    pub quick_start_root: PathBuf,
    /// Outputs in path order
    pub outputs: Vec<SyncedOutput>,
}

impl SyncReport {
    /// Verb for the summary line
    pub fn action(&self) -> &'static str {
        if self.check_only {
            "Validated"
        } else {
            "Synced"
        }
    }

    /// Output paths relative to the quick-start root
    pub fn relative_outputs(&self) -> Vec<PathBuf> {
        self.outputs
            .iter()
            .map(|output| {
                output
                    .path
                    .strip_prefix(&self.quick_start_root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| output.path.clone())
            })
            .collect()
    }
}

/// Render both documents in memory from upstream SQL and local overlays
///
/// All four inputs are checked for existence before any is read.
pub fn render_release_sql(config: &Config) -> Result<Vec<RenderedDocument>, SyncError> {
    let layout = &config.layout;
    layout.validate()?;

    for kind in DocumentKind::ALL {
        require_file(
            &config.apollo_repo_root.join(layout.upstream(kind)),
            kind.source_label(),
        )?;
    }
    for kind in DocumentKind::ALL {
        require_file(
            &config.quick_start_root.join(layout.overlay(kind)),
            kind.overlay_label(),
        )?;
    }

    let rule = ConfigRowRule::member_only_envs()?;
    let mut documents = Vec::with_capacity(DocumentKind::ALL.len());

    for kind in DocumentKind::ALL {
        let source_path = config.apollo_repo_root.join(layout.upstream(kind));
        let overlay_path = config.quick_start_root.join(layout.overlay(kind));
        let output_path = config.quick_start_root.join(layout.output(kind));
        let name = display_name(&output_path);

        let source = read_text(&source_path)?;
        let overlay = read_text(&overlay_path)?;
        debug!(
            document = %name,
            source = %source_path.display(),
            overlay = %overlay_path.display(),
            "rendering"
        );

        let mut content = render(&source, &overlay, &name)?;
        if kind.enforces_config_row() {
            content = enforce_config_value(&content, &rule, &name)?;
        }

        documents.push(RenderedDocument {
            kind,
            output_path,
            content,
            overlay,
        });
    }

    Ok(documents)
}

/// Render, optionally write, then re-read and validate every output
///
/// With `config.check_only` nothing is written; existing outputs must
/// already match what would be written.
pub fn sync(config: &Config) -> Result<SyncReport, SyncError> {
    let mut documents = render_release_sql(config)?;
    documents.sort_by(|a, b| a.output_path.cmp(&b.output_path));

    if config.check_only {
        debug!("check-only mode: skipping writes");
    } else {
        for doc in &documents {
            let bytes = write_file_atomic(&doc.output_path, &doc.content)?;
            info!(path = %doc.output_path.display(), size = %HumanBytes(bytes), "wrote");
        }
    }

    let rule = ConfigRowRule::member_only_envs()?;
    let mut outputs = Vec::with_capacity(documents.len());

    for doc in &documents {
        require_file(&doc.output_path, SYNCED_OUTPUT_LABEL)?;
        let actual = read_text(&doc.output_path)?;
        assert_same_content(&doc.output_path, &doc.content, &actual)?;

        let row_rule = doc.kind.enforces_config_row().then_some(&rule);
        validate(&actual, &doc.overlay, &doc.name(), row_rule)?;
        info!(path = %doc.output_path.display(), "validated");

        outputs.push(SyncedOutput {
            kind: doc.kind,
            path: doc.output_path.clone(),
            bytes: actual.len() as u64,
        });
    }

    Ok(SyncReport {
        check_only: config.check_only,
        quick_start_root: config.quick_start_root.clone(),
        outputs,
    })
}

/// Run the sync operation and print the summary line
pub fn run(config: Config) -> Result<SyncReport, SyncError> {
    let report = sync(&config)?;
    ui::print_summary(&report);
    Ok(report)
}
