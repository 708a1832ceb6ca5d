//! Config loading relative to the home directory
//!
//! Kept in its own test binary because it points `HOME` at a temp dir.

use prism_sql::config::{Config, LogFormat};
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_tilde_paths_resolve_against_home() {
    let home = tempdir().unwrap();
    std::env::set_var("HOME", home.path());

    let created = Config::load_or_create(Path::new("~/.prism-sql/config.toml")).unwrap();
    let written = home.path().join(".prism-sql").join("config.toml");
    assert!(written.exists());
    assert_eq!(created.logging.level, "info");

    std::fs::write(
        &written,
        "[logging]\nlevel = \"debug\"\nformat = \"json\"\nfile = \"~/logs/prism-sql.log\"\n",
    )
    .unwrap();

    let via_create = Config::load_or_create(Path::new("~/.prism-sql/config.toml")).unwrap();
    let via_load = Config::load_from(Path::new("~/.prism-sql/config.toml")).unwrap();
    assert_eq!(via_create.logging.level, "debug");
    assert_eq!(via_create.logging.format, LogFormat::Json);
    assert_eq!(via_create.logging.file, via_load.logging.file);
    assert_eq!(
        via_create.logging.file,
        Some(home.path().join("logs").join("prism-sql.log"))
    );
}
