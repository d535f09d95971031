use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

/// Command-line interface. Flags override the config file, which overrides
/// the built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "skiff", about = "Minimal HTTP/1.1 file and echo server")]
pub struct Args {
    /// Address to listen on
    #[arg(long)]
    pub addr: Option<String>,

    /// Directory to serve files from
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Optional YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Runtime settings for the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds, e.g. "127.0.0.1:4221"
    pub listen_addr: String,
    /// Root directory the file handlers resolve against
    pub root_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:4221".to_string(),
            root_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Reads settings from a YAML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let cfg = serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    /// Resolves the effective configuration: defaults, then the optional
    /// config file, then command-line overrides.
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let mut cfg = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(addr) = &args.addr {
            cfg.listen_addr = addr.clone();
        }
        if let Some(dir) = &args.directory {
            cfg.root_dir = dir.clone();
        }

        Ok(cfg)
    }
}
