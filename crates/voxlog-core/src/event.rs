//! Presence records coming in, join events going out.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::{ChannelId, GroupId, SubjectId};

/// One participant's voice-state change, as delivered by the host's event
/// bus. A `None` channel means the participant is not in voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRecord {
  pub subject_id:          SubjectId,
  #[serde(default)]
  pub channel_id:          Option<ChannelId>,
  #[serde(default)]
  pub previous_channel_id: Option<ChannelId>,
  /// Absent for channels outside any group (direct calls).
  #[serde(default)]
  pub group_id:            Option<GroupId>,
}

/// A recorded join. Everything is captured at creation; later profile
/// changes never reach an event already in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinEvent {
  pub event_id:     Uuid,
  pub subject_id:   SubjectId,
  pub handle:       String,
  pub display_name: String,
  /// Local wall-clock time, formatted once.
  pub time:         String,
  pub joined_at:    DateTime<Utc>,
}

impl JoinEvent {
  pub fn new(
    subject_id: SubjectId,
    handle: String,
    display_name: String,
    at: DateTime<Local>,
    time_format: &str,
  ) -> Self {
    Self {
      event_id: Uuid::new_v4(),
      subject_id,
      handle,
      display_name,
      time: at.format(time_format).to_string(),
      joined_at: at.with_timezone(&Utc),
    }
  }
}

/// Pick the name shown for a participant: the group nickname, then the
/// global display name, then the handle. Empty strings are skipped.
pub fn display_name<'a>(
  nickname: Option<&'a str>,
  global_name: Option<&'a str>,
  handle: &'a str,
) -> &'a str {
  nickname
    .filter(|n| !n.is_empty())
    .or_else(|| global_name.filter(|n| !n.is_empty()))
    .unwrap_or(handle)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn nickname_wins_over_global_name() {
    assert_eq!(display_name(Some("Al"), Some("Alice"), "alice"), "Al");
  }

  #[test]
  fn empty_nickname_falls_through() {
    assert_eq!(display_name(Some(""), Some("Alice"), "alice"), "Alice");
    assert_eq!(display_name(None, Some(""), "alice"), "alice");
    assert_eq!(display_name(None, None, "alice"), "alice");
  }

  #[test]
  fn time_is_formatted_once_at_creation() {
    let at = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 0).unwrap();
    let event = JoinEvent::new(
      "1".into(),
      "alice".into(),
      "Alice".into(),
      at,
      crate::config::DEFAULT_TIME_FORMAT,
    );
    assert_eq!(event.time, "3/7/2026, 09:05 AM");
    assert_eq!(event.joined_at, at.with_timezone(&Utc));
  }

  #[test]
  fn events_for_the_same_subject_are_distinct() {
    let at = Local::now();
    let a = JoinEvent::new("1".into(), "a".into(), "A".into(), at, "%H:%M");
    let b = JoinEvent::new("1".into(), "a".into(), "A".into(), at, "%H:%M");
    assert_ne!(a.event_id, b.event_id);
    assert_ne!(a, b);
  }

  #[test]
  fn presence_record_defaults_missing_channels() {
    let record: PresenceRecord =
      serde_json::from_str(r#"{"subject_id":"7"}"#).unwrap();
    assert_eq!(record.subject_id.as_str(), "7");
    assert!(record.channel_id.is_none());
    assert!(record.previous_channel_id.is_none());
    assert!(record.group_id.is_none());
  }
}
