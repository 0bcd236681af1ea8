//! The log viewer, as a plain view model rebuilt from a log snapshot.
//!
//! Styling is the host's business; this only fixes what is shown.

use uuid::Uuid;
use voxlog_core::{event::JoinEvent, host::Directory, ids::SubjectId};

/// Avatar shown when the directory no longer knows the participant.
pub const DEFAULT_AVATAR: &str = "https://cdn.discordapp.com/embed/avatars/0.png";

pub const EMPTY_MESSAGE: &str = "No logs yet. Waiting for users...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRow {
  pub event_id:     Uuid,
  pub subject_id:   SubjectId,
  pub display_name: String,
  /// The handle prefixed with `@`.
  pub handle:       String,
  pub time:         String,
  pub avatar:       String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
  pub title: String,
  pub rows:  Vec<OverlayRow>,
}

impl OverlayView {
  /// Build the view for `entries` (newest first). Avatars are looked up
  /// now rather than at record time.
  pub fn build<'a>(
    entries: impl ExactSizeIterator<Item = &'a JoinEvent>,
    directory: &impl Directory,
  ) -> Self {
    let title = format!("VC Logs ({})", entries.len());
    let rows = entries
      .map(|event| OverlayRow {
        event_id:     event.event_id,
        subject_id:   event.subject_id.clone(),
        display_name: event.display_name.clone(),
        handle:       format!("@{}", event.handle),
        time:         event.time.clone(),
        avatar:       directory
          .resolve_subject(&event.subject_id)
          .and_then(|profile| profile.avatar)
          .unwrap_or_else(|| DEFAULT_AVATAR.to_owned()),
      })
      .collect();
    Self { title, rows }
  }

  /// The placeholder line, when there are no rows.
  pub fn empty_message(&self) -> Option<&'static str> {
    self.rows.is_empty().then_some(EMPTY_MESSAGE)
  }
}
