//! Server configuration, deserialised from `config.toml` and `SNACK_*`
//! environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use serde::Deserialize;
use snack_core::spot::CoordinateDecode;

fn default_host() -> String { "127.0.0.1".into() }

fn default_port() -> u16 { 5240 }

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/snack/snack.sqlite") }

fn default_timeout_secs() -> u64 { 10 }

fn default_restore_coordinates() -> bool { true }

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  #[serde(default = "default_store_path")]
  pub store_path:          PathBuf,
  /// Deadline for each document-store call.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs:        u64,
  /// Rebuild spot coordinates from stored latitude/longitude on load.
  #[serde(default = "default_restore_coordinates")]
  pub restore_coordinates: bool,
}

impl ServerConfig {
  /// Layer the optional TOML file under `SNACK_*` environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("SNACK"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

  pub fn coordinate_decode(&self) -> CoordinateDecode {
    if self.restore_coordinates {
      CoordinateDecode::Restore
    } else {
      CoordinateDecode::Discard
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
