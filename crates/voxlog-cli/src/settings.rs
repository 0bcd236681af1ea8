//! Shape of `voxlog.toml` and how it is loaded.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use voxlog_core::{
  config::PluginConfig,
  ids::{ChannelId, GroupId, SubjectId},
};

/// One participant the replay directory knows about.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
  pub id:           SubjectId,
  pub handle:       String,
  #[serde(default)]
  pub display_name: Option<String>,
  #[serde(default)]
  pub avatar:       Option<String>,
}

/// A per-group nickname.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberEntry {
  pub group:    GroupId,
  pub subject:  SubjectId,
  pub nickname: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayConfig {
  pub local_subject:    SubjectId,
  /// Channel the local user is already in when the script starts.
  #[serde(default)]
  pub initial_channel:  Option<ChannelId>,
  #[serde(default)]
  pub plugin:           PluginConfig,
  #[serde(default)]
  pub subjects:         Vec<RosterEntry>,
  #[serde(default)]
  pub members:          Vec<MemberEntry>,
  /// Write copies to the system clipboard instead of echoing them.
  #[serde(default)]
  pub system_clipboard: bool,
}

impl ReplayConfig {
  /// Layer the optional config file under `VOXLOG_*` environment variables
  /// (`__` separates nested keys, e.g. `VOXLOG_PLUGIN__MAX_ENTRIES`).
  pub fn load(path: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("VOXLOG")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .with_context(|| format!("reading config file {}", path.display()))?;

    let config: Self = settings
      .try_deserialize()
      .context("failed to deserialise ReplayConfig")?;
    config.plugin.validate().context("invalid [plugin] settings")?;
    Ok(config)
  }
}
