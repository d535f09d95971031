use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use skiff::config::{Args, Config};

fn no_args() -> Args {
    Args {
        addr: None,
        directory: None,
        config: None,
    }
}

#[test]
fn test_config_defaults() {
    let cfg = Config::load(&no_args()).unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:4221");
    assert_eq!(cfg.root_dir, PathBuf::from("."));
}

#[test]
fn test_config_flag_parsing() {
    let args = Args::parse_from([
        "skiff",
        "--addr",
        "0.0.0.0:3000",
        "--directory",
        "/srv/files",
    ]);

    let cfg = Config::load(&args).unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.root_dir, PathBuf::from("/srv/files"));
}

#[test]
fn test_config_from_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skiff.yaml");
    std::fs::write(
        &path,
        "listen_addr: \"0.0.0.0:9000\"\nroot_dir: \"/tmp/served\"\n",
    )
    .unwrap();

    let args = Args {
        addr: None,
        directory: None,
        config: Some(path),
    };

    let cfg = Config::load(&args).unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:9000");
    assert_eq!(cfg.root_dir, PathBuf::from("/tmp/served"));
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skiff.yaml");
    std::fs::write(&path, "listen_addr: \"0.0.0.0:9000\"\n").unwrap();

    let args = Args {
        addr: None,
        directory: None,
        config: Some(path),
    };

    let cfg = Config::load(&args).unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:9000");
    assert_eq!(cfg.root_dir, PathBuf::from("."));
}

#[test]
fn test_config_flags_override_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skiff.yaml");
    std::fs::write(
        &path,
        "listen_addr: \"0.0.0.0:9000\"\nroot_dir: \"/tmp/served\"\n",
    )
    .unwrap();

    let args = Args {
        addr: Some("127.0.0.1:8888".to_string()),
        directory: None,
        config: Some(path),
    };

    let cfg = Config::load(&args).unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:8888");
    // The file still supplies what no flag overrode.
    assert_eq!(cfg.root_dir, PathBuf::from("/tmp/served"));
}

#[test]
fn test_config_missing_file_is_an_error() {
    let args = Args {
        addr: None,
        directory: None,
        config: Some(PathBuf::from("/definitely/not/here.yaml")),
    };

    assert!(Config::load(&args).is_err());
}

#[test]
fn test_config_unparseable_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skiff.yaml");
    std::fs::write(&path, "listen_addr: [this is not a string").unwrap();

    let args = Args {
        addr: None,
        directory: None,
        config: Some(path),
    };

    assert!(Config::load(&args).is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::load(&no_args()).unwrap();
    let cfg2 = cfg1.clone();

    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
    assert_eq!(cfg1.root_dir, cfg2.root_dir);
}
