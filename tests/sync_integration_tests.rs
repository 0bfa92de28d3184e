//! End-to-end sync command integration tests.
//!
//! A fake upstream checkout and quick-start repository are seeded in a
//! temp dir, then synced, re-synced, and checked.

use relsync::render::FOOTER_ANCHOR;
use relsync::{sync, Config, Layout, SyncError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG_OVERLAY: &str = "# Sample Data\n\
    # ------------------------------------------------------------\n\
    INSERT INTO `Config` VALUES (2);\n";

const PORTAL_OVERLAY: &str = "# Sample Data\n\
    # ------------------------------------------------------------\n\
    INSERT INTO `ServerConfig` (`Key`, `Value`, `Comment`)\n\
    VALUES\n    ('sample.key', 'sample.value', 'sample config');\n";

fn config_source() -> String {
    format!(
        "CREATE TABLE `Config` (`Id` int(11));\n\
         INSERT INTO `Config` VALUES (1);\n\n\
         {FOOTER_ANCHOR}\n\
         /*!40101 SET SQL_MODE=@OLD_SQL_MODE */;\n"
    )
}

fn portal_source() -> String {
    format!(
        "INSERT INTO `ServerConfig` (`Key`, `Value`, `Comment`)\n\
         VALUES\n    ('configView.memberOnly.envs', 'pro', 'desc');\n\n\
         {FOOTER_ANCHOR}\n\
         /*!40101 SET SQL_MODE=@OLD_SQL_MODE */;\n"
    )
}

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().expect("path has parent")).expect("create parent dir");
    fs::write(path, content).expect("write seed file");
}

fn seed_fake_layout(root: &Path) -> Config {
    let apollo = root.join("apollo");
    let quick_start = root.join("apollo-quick-start");
    let layout = Layout::default();

    write_file(&apollo.join(&layout.upstream_config), &config_source());
    write_file(&apollo.join(&layout.upstream_portal), &portal_source());
    write_file(&quick_start.join(&layout.overlay_config), CONFIG_OVERLAY);
    write_file(&quick_start.join(&layout.overlay_portal), PORTAL_OVERLAY);

    Config {
        apollo_repo_root: apollo,
        quick_start_root: quick_start,
        check_only: false,
        layout,
    }
}

fn read(config: &Config, rel: &str) -> String {
    fs::read_to_string(config.quick_start_root.join(rel)).expect("read synced output")
}

#[test]
fn test_sync_config_output_layout() {
    let tmp = TempDir::new().expect("create tempdir");
    let config = seed_fake_layout(tmp.path());

    sync(&config).expect("sync should succeed");

    let expected = format!(
        "CREATE TABLE `Config` (`Id` int(11));\n\
         INSERT INTO `Config` VALUES (1);\n\n\
         {}\n\n\
         {FOOTER_ANCHOR}\n\
         /*!40101 SET SQL_MODE=@OLD_SQL_MODE */;\n",
        CONFIG_OVERLAY.trim_end_matches('\n')
    );
    assert_eq!(read(&config, "sql/apolloconfigdb.sql"), expected);
}

#[test]
fn test_sync_forces_member_only_envs_to_dev() {
    let tmp = TempDir::new().expect("create tempdir");
    let config = seed_fake_layout(tmp.path());

    sync(&config).expect("sync should succeed");

    let portal = read(&config, "sql/apolloportaldb.sql");
    assert!(portal.contains("('configView.memberOnly.envs', 'dev', 'desc')"));
    assert_eq!(portal.matches("'configView.memberOnly.envs'").count(), 1);
    assert!(portal.contains("('sample.key', 'sample.value', 'sample config')"));
}

#[test]
fn test_sync_is_idempotent() {
    let tmp = TempDir::new().expect("create tempdir");
    let mut config = seed_fake_layout(tmp.path());

    sync(&config).expect("first sync");
    let first_config = read(&config, "sql/apolloconfigdb.sql");
    let first_portal = read(&config, "sql/apolloportaldb.sql");

    sync(&config).expect("second sync");
    assert_eq!(first_config, read(&config, "sql/apolloconfigdb.sql"));
    assert_eq!(first_portal, read(&config, "sql/apolloportaldb.sql"));

    config.check_only = true;
    sync(&config).expect("check-only after sync should succeed");
}

#[test]
fn test_check_only_without_outputs_fails_and_writes_nothing() {
    let tmp = TempDir::new().expect("create tempdir");
    let mut config = seed_fake_layout(tmp.path());
    config.check_only = true;

    let err = sync(&config).expect_err("check-only without outputs must fail");

    assert!(matches!(err, SyncError::MissingFile { .. }));
    assert!(err.to_string().starts_with("Synced SQL output does not exist"));
    assert!(!config.quick_start_root.join("sql/apolloconfigdb.sql").exists());
    assert!(!config.quick_start_root.join("sql/apolloportaldb.sql").exists());
}

#[test]
fn test_check_only_detects_hand_edit() {
    let tmp = TempDir::new().expect("create tempdir");
    let mut config = seed_fake_layout(tmp.path());
    sync(&config).expect("sync should succeed");

    let portal_path = config.quick_start_root.join("sql/apolloportaldb.sql");
    let edited = read(&config, "sql/apolloportaldb.sql").replace("'dev'", "'pro'");
    fs::write(&portal_path, &edited).expect("hand-edit output");

    config.check_only = true;
    let err = sync(&config).expect_err("check-only must detect drift");

    match &err {
        SyncError::ContentMismatch { path, preview } => {
            assert_eq!(path, &portal_path);
            assert!(preview.contains("(expected)"));
            assert!(preview.contains("(actual)"));
            assert!(preview.contains("'pro'"));
        }
        other => panic!("expected ContentMismatch, got {other:?}"),
    }
    assert_eq!(
        fs::read_to_string(&portal_path).expect("read output"),
        edited,
        "check-only must not rewrite outputs"
    );
}

#[test]
fn test_upstream_without_anchor_fails() {
    let tmp = TempDir::new().expect("create tempdir");
    let config = seed_fake_layout(tmp.path());
    fs::write(
        config.apollo_repo_root.join(&config.layout.upstream_config),
        "CREATE TABLE `Config` (`Id` int(11));\n",
    )
    .expect("overwrite upstream");

    let err = sync(&config).expect_err("missing anchor must fail");
    assert!(matches!(err, SyncError::AnchorNotFound { count: 0, .. }));
    assert!(!config.quick_start_root.join("sql/apolloportaldb.sql").exists());
}

#[test]
fn test_blank_overlay_fails() {
    let tmp = TempDir::new().expect("create tempdir");
    let config = seed_fake_layout(tmp.path());
    fs::write(
        config.quick_start_root.join(&config.layout.overlay_portal),
        "\n\n",
    )
    .expect("blank overlay");

    let err = sync(&config).expect_err("blank overlay must fail");
    assert!(matches!(err, SyncError::EmptyOverlay { .. }));
}

#[test]
fn test_portal_without_config_row_fails() {
    let tmp = TempDir::new().expect("create tempdir");
    let config = seed_fake_layout(tmp.path());
    fs::write(
        config.apollo_repo_root.join(&config.layout.upstream_portal),
        format!("SELECT 1;\n{FOOTER_ANCHOR}\n"),
    )
    .expect("overwrite upstream portal");

    let err = sync(&config).expect_err("missing config row must fail");
    assert!(matches!(err, SyncError::ConfigKeyNotFound { count: 0, .. }));
}

#[test]
fn test_missing_upstream_reports_label() {
    let tmp = TempDir::new().expect("create tempdir");
    let config = seed_fake_layout(tmp.path());
    fs::remove_file(config.apollo_repo_root.join(&config.layout.upstream_portal))
        .expect("remove upstream portal");

    let err = sync(&config).expect_err("missing upstream must fail");
    assert!(err.to_string().starts_with("Apollo portal SQL does not exist"));
}

#[test]
fn test_output_onto_overlay_is_refused() {
    let tmp = TempDir::new().expect("create tempdir");
    let mut config = seed_fake_layout(tmp.path());
    config.layout.output_config = config.layout.overlay_config.clone();

    let err = sync(&config).expect_err("output over overlay must fail");
    assert!(matches!(err, SyncError::Config(_)));

    let overlay = fs::read_to_string(config.quick_start_root.join(&config.layout.overlay_config))
        .expect("read overlay");
    assert_eq!(overlay, CONFIG_OVERLAY, "overlay must be left untouched");
}

#[test]
fn test_custom_layout_outputs() {
    let tmp = TempDir::new().expect("create tempdir");
    let mut config = seed_fake_layout(tmp.path());
    config.layout.output_config = "db/config.sql".into();
    config.layout.output_portal = "db/portal.sql".into();

    let report = sync(&config).expect("sync with custom layout");

    assert_eq!(
        report.relative_outputs(),
        vec![Path::new("db/config.sql"), Path::new("db/portal.sql")]
    );
    assert!(read(&config, "db/portal.sql").contains("'configView.memberOnly.envs', 'dev',"));
}
