//! Command line options and logging setup.
//!
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::app::default_config_dir;
use crate::error::{Context, Result};
use crate::members::{DEFAULT_MEMBERS_URL, MemberSource};

#[derive(Parser, Debug, Clone)]
#[command(name = "member-admin", version, about = "Search, page, edit and delete member records in a terminal table")]
pub struct Cli {
    /// URL of the JSON member list.
    #[arg(long, env = "MEMBER_ADMIN_URL", default_value = DEFAULT_MEMBERS_URL, conflicts_with = "file")]
    pub url: String,

    /// Load members from a local JSON file instead of the URL.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Directory for theme.conf, keybinds.conf and the default log file.
    #[arg(long, env = "MEMBER_ADMIN_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log file (defaults to member-admin.log in the config directory).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn source(&self) -> MemberSource {
        match &self.file {
            Some(path) => MemberSource::File(path.clone()),
            None => MemberSource::Url(self.url.clone()),
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone().unwrap_or_else(default_config_dir)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.config_dir().join("member-admin.log"))
    }
}

/// Send `tracing` output to `path`; the terminal itself belongs to the TUI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_ctx(|| format!("create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_ctx(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_flag_selects_file_source() {
        let cli = Cli::try_parse_from(["member-admin", "--file", "members.json"]).expect("parse");
        assert_eq!(cli.source(), MemberSource::File(PathBuf::from("members.json")));
    }

    #[test]
    fn url_and_file_conflict() {
        let res = Cli::try_parse_from([
            "member-admin",
            "--url",
            "http://localhost/members.json",
            "--file",
            "members.json",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn log_path_defaults_into_config_dir() {
        let cli = Cli::try_parse_from(["member-admin", "--config-dir", "/tmp/ma-cfg"]).expect("parse");
        assert_eq!(cli.log_path(), PathBuf::from("/tmp/ma-cfg/member-admin.log"));
    }
}
