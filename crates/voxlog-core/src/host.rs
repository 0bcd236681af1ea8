//! Services the host application provides to the logger.
//!
//! Each trait is a thin read-through or fire-and-forget call; none of them
//! can fail from the logger's point of view. Notifier and clipboard take
//! `&self` so a single host value can serve every role at once.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::ids::{ChannelId, GroupId, SubjectId};

// ─── Directory ───────────────────────────────────────────────────────────────

/// A participant's global profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectProfile {
  pub handle:       String,
  /// Global display name, if the participant set one.
  pub display_name: Option<String>,
  /// Avatar URL or other reference understood by the host.
  pub avatar:       Option<String>,
}

/// A participant's per-group profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
  pub nickname: Option<String>,
}

pub trait Directory {
  fn resolve_subject(&self, subject: &SubjectId) -> Option<SubjectProfile>;

  fn resolve_member(
    &self,
    group: &GroupId,
    subject: &SubjectId,
  ) -> Option<MemberProfile>;
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// State of the local user's own session.
pub trait Session {
  /// The voice channel the local user is in right now, if any.
  fn current_channel(&self) -> Option<ChannelId>;

  fn local_subject(&self) -> SubjectId;
}

// ─── Notifications ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Success,
  Error,
}

/// A toast request. Delivery is best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub title:    String,
  pub body:     String,
  pub severity: Severity,
  pub icon:     Option<String>,
}

impl Notification {
  pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
    Self {
      title:    title.into(),
      body:     body.into(),
      severity: Severity::Success,
      icon:     None,
    }
  }

  pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
    Self {
      severity: Severity::Error,
      ..Self::success(title, body)
    }
  }

  pub fn with_icon(mut self, icon: Option<String>) -> Self {
    self.icon = icon;
    self
  }
}

pub trait Notifier {
  fn notify(&self, notification: Notification);
}

// ─── Clipboard ───────────────────────────────────────────────────────────────

pub trait Clipboard {
  fn copy(&self, text: &str);
}

// ─── Bundle ──────────────────────────────────────────────────────────────────

/// Everything the logger needs from the host besides its rendered tree.
pub trait Host: Directory + Session + Notifier + Clipboard {}

impl<T: Directory + Session + Notifier + Clipboard> Host for T {}
