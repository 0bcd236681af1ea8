//! Text and JSON renderings of the log for copying out.

use crate::{Error, Result, event::JoinEvent};

pub const RECORD_SEPARATOR: &str = "------------------";

/// One record as a fixed block of labelled lines.
pub fn record_text(event: &JoinEvent) -> String {
  format!(
    "Display: {}\nUsername: {}\nID: {}\nTime: {}\n{RECORD_SEPARATOR}",
    event.display_name, event.handle, event.subject_id, event.time,
  )
}

/// All records, in the order given, for the "copy all" action. Fails with
/// [`Error::EmptyLogOnCopyAll`] when there is nothing to copy.
pub fn copy_all_text<'a>(
  entries: impl IntoIterator<Item = &'a JoinEvent>,
) -> Result<String> {
  let blocks: Vec<String> = entries.into_iter().map(record_text).collect();
  if blocks.is_empty() {
    return Err(Error::EmptyLogOnCopyAll);
  }
  Ok(blocks.join("\n"))
}

pub fn to_json<'a>(
  entries: impl IntoIterator<Item = &'a JoinEvent>,
) -> Result<String> {
  let entries: Vec<&JoinEvent> = entries.into_iter().collect();
  Ok(serde_json::to_string_pretty(&entries)?)
}

#[cfg(test)]
mod tests {
  use chrono::Local;

  use super::*;
  use crate::log::EventLog;

  fn event(id: &str, handle: &str, name: &str) -> JoinEvent {
    JoinEvent {
      time: "1/2/2026, 03:04 PM".into(),
      ..JoinEvent::new(id.into(), handle.into(), name.into(), Local::now(), "")
    }
  }

  #[test]
  fn record_block_layout() {
    let text = record_text(&event("42", "alice", "Alice"));
    assert_eq!(
      text,
      "Display: Alice\nUsername: alice\nID: 42\nTime: 1/2/2026, 03:04 PM\n------------------"
    );
  }

  #[test]
  fn empty_log_is_an_error() {
    let log = EventLog::new();
    assert!(matches!(copy_all_text(log.snapshot()), Err(Error::EmptyLogOnCopyAll)));
  }

  #[test]
  fn copy_all_follows_snapshot_order() {
    let mut log = EventLog::new();
    log.prepend(event("1", "alice", "Alice"));
    log.prepend(event("2", "bob", "Bob"));
    log.prepend(event("1", "alice", "Alice"));

    let text = copy_all_text(log.snapshot()).unwrap();
    assert_eq!(text.matches(RECORD_SEPARATOR).count(), log.len());

    let ids: Vec<_> = text
      .lines()
      .filter_map(|line| line.strip_prefix("ID: "))
      .collect();
    let expected: Vec<_> = log.snapshot().map(|e| e.subject_id.as_str()).collect();
    assert_eq!(ids, expected);
  }

  #[test]
  fn json_export_lists_every_entry() {
    let mut log = EventLog::new();
    log.prepend(event("1", "alice", "Alice"));
    log.prepend(event("2", "bob", "Bob"));

    let json = to_json(log.snapshot()).unwrap();
    let parsed: Vec<JoinEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, log.snapshot().cloned().collect::<Vec<_>>());
  }
}
