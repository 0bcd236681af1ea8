//! The replay stand-in for the host application's services.

use std::{cell::RefCell, collections::HashMap};

use voxlog_core::{
  event::PresenceRecord,
  host::{
    Clipboard, Directory, MemberProfile, Notification, Notifier, Session,
    SubjectProfile,
  },
  ids::{ChannelId, GroupId, SubjectId},
};

use crate::{settings::ReplayConfig, ui};

pub struct ReplayHost {
  local:     SubjectId,
  channel:   RefCell<Option<ChannelId>>,
  subjects:  HashMap<SubjectId, SubjectProfile>,
  nicknames: HashMap<(GroupId, SubjectId), String>,
  clipboard: Option<RefCell<arboard::Clipboard>>,
  /// Every text handed to [`Clipboard::copy`], in order.
  copied:    RefCell<Vec<String>>,
}

impl ReplayHost {
  pub fn new(config: &ReplayConfig) -> Self {
    let subjects = config
      .subjects
      .iter()
      .map(|entry| {
        (entry.id.clone(), SubjectProfile {
          handle:       entry.handle.clone(),
          display_name: entry.display_name.clone(),
          avatar:       entry.avatar.clone(),
        })
      })
      .collect();
    let nicknames = config
      .members
      .iter()
      .map(|m| ((m.group.clone(), m.subject.clone()), m.nickname.clone()))
      .collect();

    let clipboard = if config.system_clipboard {
      match arboard::Clipboard::new() {
        Ok(clipboard) => Some(RefCell::new(clipboard)),
        Err(e) => {
          tracing::warn!(error = %e, "system clipboard unavailable, echoing copies");
          None
        }
      }
    } else {
      None
    };

    Self {
      local: config.local_subject.clone(),
      channel: RefCell::new(config.initial_channel.clone()),
      subjects,
      nicknames,
      clipboard,
      copied: RefCell::new(Vec::new()),
    }
  }

  /// Apply the local user's own moves from `batch`, as the host's session
  /// store would before the batch reaches any listener.
  pub fn observe_self(&self, batch: &[PresenceRecord]) {
    for record in batch.iter().filter(|r| r.subject_id == self.local) {
      tracing::debug!(channel = ?record.channel_id, "local user moved");
      *self.channel.borrow_mut() = record.channel_id.clone();
    }
  }

  #[cfg(test)]
  pub fn copied(&self) -> Vec<String> { self.copied.borrow().clone() }
}

impl Directory for ReplayHost {
  fn resolve_subject(&self, subject: &SubjectId) -> Option<SubjectProfile> {
    self.subjects.get(subject).cloned()
  }

  fn resolve_member(
    &self,
    group: &GroupId,
    subject: &SubjectId,
  ) -> Option<MemberProfile> {
    self
      .nicknames
      .get(&(group.clone(), subject.clone()))
      .map(|nickname| MemberProfile {
        nickname: Some(nickname.clone()),
      })
  }
}

impl Session for ReplayHost {
  fn current_channel(&self) -> Option<ChannelId> { self.channel.borrow().clone() }

  fn local_subject(&self) -> SubjectId { self.local.clone() }
}

impl Notifier for ReplayHost {
  fn notify(&self, notification: Notification) {
    tracing::debug!(
      severity = %notification.severity,
      title = %notification.title,
      "notification"
    );
    println!("{}", ui::notification_line(&notification));
  }
}

impl Clipboard for ReplayHost {
  fn copy(&self, text: &str) {
    self.copied.borrow_mut().push(text.to_owned());
    match &self.clipboard {
      Some(clipboard) => {
        if let Err(e) = clipboard.borrow_mut().set_text(text) {
          tracing::warn!(error = %e, "clipboard write failed");
        }
      }
      None => println!("{}", ui::clipboard_block(text)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config() -> ReplayConfig {
    serde_json::from_value(serde_json::json!({
      "local_subject": "me",
      "initial_channel": "C",
      "subjects": [{ "id": "1", "handle": "alice" }],
      "members": [{ "group": "g", "subject": "1", "nickname": "Al" }],
    }))
    .unwrap()
  }

  fn moved(subject: &str, to: Option<&str>) -> PresenceRecord {
    PresenceRecord {
      subject_id:          subject.into(),
      channel_id:          to.map(Into::into),
      previous_channel_id: None,
      group_id:            None,
    }
  }

  #[test]
  fn starts_in_initial_channel() {
    let host = ReplayHost::new(&config());
    assert_eq!(host.current_channel(), Some(ChannelId::from("C")));
    assert_eq!(host.local_subject(), SubjectId::from("me"));
  }

  #[test]
  fn follows_local_moves_only() {
    let host = ReplayHost::new(&config());
    host.observe_self(&[moved("1", Some("X"))]);
    assert_eq!(host.current_channel(), Some(ChannelId::from("C")));

    host.observe_self(&[moved("me", Some("D"))]);
    assert_eq!(host.current_channel(), Some(ChannelId::from("D")));

    host.observe_self(&[moved("me", None)]);
    assert_eq!(host.current_channel(), None);
  }

  #[test]
  fn directory_is_built_from_roster() {
    let host = ReplayHost::new(&config());
    let profile = host.resolve_subject(&"1".into()).unwrap();
    assert_eq!(profile.handle, "alice");
    assert!(host.resolve_subject(&"2".into()).is_none());

    let member = host.resolve_member(&"g".into(), &"1".into()).unwrap();
    assert_eq!(member.nickname.as_deref(), Some("Al"));
  }

  #[test]
  fn copies_are_recorded_without_system_clipboard() {
    let host = ReplayHost::new(&config());
    host.copy("hello");
    assert_eq!(host.copied(), ["hello"]);
  }
}
