//! Runtime settings for the logger.

use std::num::NonZeroUsize;

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use crate::{Error, Result};

/// `chrono` format used for [`crate::event::JoinEvent::time`]: numeric
/// date followed by a two-digit hour and minute.
pub const DEFAULT_TIME_FORMAT: &str = "%-m/%-d/%Y, %I:%M %p";

/// Accessible label of the host control the entry-point is placed beside.
pub const DEFAULT_ANCHOR_LABEL: &str = "Inbox";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
  /// `chrono` strftime string applied once when an event is recorded.
  pub time_format:  String,
  /// Evict the oldest entry past this many. Unbounded when unset.
  pub max_entries:  Option<NonZeroUsize>,
  pub anchor_label: String,
}

impl Default for PluginConfig {
  fn default() -> Self {
    Self {
      time_format:  DEFAULT_TIME_FORMAT.to_owned(),
      max_entries:  None,
      anchor_label: DEFAULT_ANCHOR_LABEL.to_owned(),
    }
  }
}

impl PluginConfig {
  /// Reject settings that would only fail later, mid-reaction.
  pub fn validate(&self) -> Result<()> {
    if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
      return Err(Error::InvalidTimeFormat(self.time_format.clone()));
    }
    Ok(())
  }
}
