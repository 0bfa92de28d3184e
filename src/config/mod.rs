//! Configuration management

mod layout;

pub use layout::Layout;

use crate::types::SyncError;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "relsync",
    version,
    about = "Sync quick-start SQL files from Apollo release SQL and local overlays."
)]
pub struct Cli {
    /// Path to the checked-out apollo repository at target tag
    #[arg(long, value_name = "PATH")]
    pub apollo_repo_root: PathBuf,

    /// Path to apollo-quick-start repository root
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub quick_start_root: PathBuf,

    /// Validate that outputs match expected synced content without writing files
    #[arg(long)]
    pub check: bool,

    /// TOML file overriding the default input/output paths
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Validated configuration for one sync run
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream release checkout
    pub apollo_repo_root: PathBuf,

    /// Quick-start repository that receives the outputs
    pub quick_start_root: PathBuf,

    /// Render and validate without writing
    pub check_only: bool,

    /// Relative file layout
    pub layout: Layout,
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), SyncError> {
        require_dir(&self.apollo_repo_root, "Apollo repo root")?;
        require_dir(&self.quick_start_root, "Quick-start root")?;
        self.layout.validate()
    }
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let layout = match cli.layout.as_deref() {
            Some(path) => Layout::load(path)?,
            None => Layout::default(),
        };

        let config = Config {
            apollo_repo_root: resolve_root(&cli.apollo_repo_root, "Apollo repo root")?,
            quick_start_root: resolve_root(&cli.quick_start_root, "Quick-start root")?,
            check_only: cli.check,
            layout,
        };
        config.validate()?;
        Ok(config)
    }
}

fn resolve_root(path: &Path, label: &str) -> Result<PathBuf, SyncError> {
    path.canonicalize().map_err(|e| {
        SyncError::Config(format!("{} cannot be resolved: {} ({})", label, path.display(), e))
    })
}

fn require_dir(path: &Path, label: &str) -> Result<(), SyncError> {
    if !path.is_dir() {
        return Err(SyncError::Config(format!(
            "{} is not a directory: {}",
            label,
            path.display()
        )));
    }
    Ok(())
}
