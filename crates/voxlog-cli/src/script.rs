//! Session scripts: one JSON object per line, tagged by `"op"`.
//!
//! ```text
//! {"op":"presence","records":[{"subject_id":"1","channel_id":"C","group_id":"g"}]}
//! {"op":"rerender"}
//! {"op":"click","target":"entry_point"}
//! {"op":"click","target":"copy_id","subject_id":"1"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use anyhow::{Context, Result};
use serde::Deserialize;
use voxlog_core::{event::PresenceRecord, ids::SubjectId};
use voxlog_surface::Intent;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
  /// A batch from the presence bus.
  Presence { records: Vec<PresenceRecord> },
  /// The host redraws its toolbar.
  Rerender,
  RemoveAnchor,
  RestoreAnchor,
  /// The host drops the entry-point without redrawing anything else.
  RemoveEntryPoint,
  Click(Click),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Click {
  EntryPoint,
  CloseButton,
  Backdrop,
  CopyAll,
  Clear,
  CopyId { subject_id: SubjectId },
}

impl Click {
  pub fn intent(&self) -> Intent {
    match self {
      Self::EntryPoint => Intent::ToggleOverlay,
      Self::CloseButton | Self::Backdrop => Intent::Dismiss,
      Self::CopyAll => Intent::CopyAll,
      Self::Clear => Intent::Clear,
      Self::CopyId { subject_id } => Intent::CopySubjectId(subject_id.clone()),
    }
  }
}

impl Step {
  /// Parse one script line. `Ok(None)` for blanks and comments.
  pub fn parse(line: &str) -> Result<Option<Self>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      return Ok(None);
    }
    let step = serde_json::from_str(line)
      .with_context(|| format!("parsing step {line:?}"))?;
    Ok(Some(step))
  }
}
