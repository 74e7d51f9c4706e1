//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Personal crochet project tracker.
///
/// Settings come from a TOML file (`--config`, `./stitchlog.toml` or the
/// user configuration directory). Command line arguments take precedence.
#[derive(Parser, Debug, Default)]
#[command(name = "stitchlog", version, about)]
pub struct Cli {
    /// Configuration file to read instead of the default lookup
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// HTTP server bind address [default: 127.0.0.1:5000]
    #[arg(long, short = 'b')]
    pub bind: Option<String>,

    /// SQLite database URL, e.g. sqlite://crochet.db?mode=rwc
    #[arg(long, short = 'd')]
    pub database_url: Option<String>,

    /// Directory where uploaded thumbnails are stored
    #[arg(long, short = 'u')]
    pub upload_dir: Option<PathBuf>,

    /// Write a commented default configuration file to this path and exit
    #[arg(long, value_name = "PATH")]
    pub generate_config: Option<PathBuf>,
}

impl Cli {
    /// Overlay the command line values onto a loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind_addr = bind.clone();
        }
        if let Some(url) = &self.database_url {
            config.storage.database_url = url.clone();
        }
        if let Some(dir) = &self.upload_dir {
            config.storage.upload_dir = dir.clone();
        }
    }
}
