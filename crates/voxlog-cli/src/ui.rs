//! Plain-text rendering of what the host would put on screen.

use voxlog_core::host::Notification;
use voxlog_surface::overlay::OverlayView;

/// The overlay as a boxed block: title and actions, then one line per row.
pub fn overlay_block(view: &OverlayView) -> String {
  let mut lines = vec![format!(
    "┌─ {} ─ [copy all] [clear] [close]",
    view.title
  )];
  match view.empty_message() {
    Some(message) => lines.push(format!("│ {message}")),
    None => lines.extend(view.rows.iter().map(|row| {
      format!(
        "│ {}  {}  {} [copy id]  {}",
        row.display_name, row.handle, row.subject_id, row.time
      )
    })),
  }
  lines.push("└─".to_owned());
  lines.join("\n")
}

pub fn notification_line(notification: &Notification) -> String {
  format!(
    "[{}] {}: {}",
    notification.severity, notification.title, notification.body
  )
}

pub fn clipboard_block(text: &str) -> String {
  format!("[clipboard]\n{text}")
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;
  use voxlog_surface::overlay::{EMPTY_MESSAGE, OverlayRow};

  use super::*;

  #[test]
  fn empty_overlay_shows_placeholder() {
    let view = OverlayView {
      title: "VC Logs (0)".into(),
      rows:  vec![],
    };
    let text = overlay_block(&view);
    assert!(text.starts_with("┌─ VC Logs (0) ─"));
    assert!(text.contains(EMPTY_MESSAGE));
  }

  #[test]
  fn rows_render_one_per_line() {
    let row = |id: &str, name: &str| OverlayRow {
      event_id:     Uuid::nil(),
      subject_id:   id.into(),
      display_name: name.into(),
      handle:       format!("@{}", name.to_lowercase()),
      time:         "1/1/2026, 10:00 AM".into(),
      avatar:       String::new(),
    };
    let view = OverlayView {
      title: "VC Logs (2)".into(),
      rows:  vec![row("2", "Bob"), row("1", "Alice")],
    };
    let text = overlay_block(&view);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "│ Bob  @bob  2 [copy id]  1/1/2026, 10:00 AM");
    assert!(lines[2].contains("@alice"));
  }

  #[test]
  fn notification_shows_severity() {
    let line = notification_line(&Notification::error("Error", "nope"));
    assert_eq!(line, "[error] Error: nope");
  }
}
