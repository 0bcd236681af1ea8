//! Turns presence batches into join events.
//!
//! A record is a join when the participant moved *into* the channel the
//! local user currently occupies from somewhere else (or from nowhere),
//! and the participant is not the local user. Records are handled in batch
//! order; nothing is coalesced across batches.

use chrono::{DateTime, Local};

use crate::{
  Error, Result,
  event::{JoinEvent, PresenceRecord, display_name},
  host::{Directory, Session},
  ids::{ChannelId, SubjectId},
};

/// Where the local user stands when a batch arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalContext {
  pub channel: Option<ChannelId>,
  pub subject: SubjectId,
}

impl LocalContext {
  pub fn from_session(session: &impl Session) -> Self {
    Self {
      channel: session.current_channel(),
      subject: session.local_subject(),
    }
  }
}

/// The records in `batch` that are true entries into the local channel.
/// Yields nothing when the local user is not in a channel.
pub fn entrants<'a>(
  local: &'a LocalContext,
  batch: &'a [PresenceRecord],
) -> impl Iterator<Item = &'a PresenceRecord> + 'a {
  let occupied = local.channel.as_ref();
  batch.iter().filter(move |record| {
    let Some(occupied) = occupied else {
      return false;
    };
    record.subject_id != local.subject
      && record.channel_id.as_ref() == Some(occupied)
      && record.previous_channel_id.as_ref() != Some(occupied)
  })
}

#[derive(Debug, Clone)]
pub struct TransitionDetector {
  time_format: String,
}

impl TransitionDetector {
  pub fn new(time_format: impl Into<String>) -> Self {
    Self {
      time_format: time_format.into(),
    }
  }

  /// Snapshot the participant behind `record` into a [`JoinEvent`] stamped
  /// with `at`.
  pub fn resolve(
    &self,
    directory: &impl Directory,
    record: &PresenceRecord,
    at: DateTime<Local>,
  ) -> Result<JoinEvent> {
    let subject = &record.subject_id;
    let profile = directory
      .resolve_subject(subject)
      .ok_or_else(|| Error::UnresolvedSubject(subject.clone()))?;
    let member = record
      .group_id
      .as_ref()
      .and_then(|group| directory.resolve_member(group, subject));

    let name = display_name(
      member.as_ref().and_then(|m| m.nickname.as_deref()),
      profile.display_name.as_deref(),
      &profile.handle,
    )
    .to_owned();

    Ok(JoinEvent::new(
      subject.clone(),
      profile.handle,
      name,
      at,
      &self.time_format,
    ))
  }

  /// Lazily produce a [`JoinEvent`] for every entrant in `batch`.
  /// Entrants the directory cannot resolve are dropped without a trace.
  pub fn detect<'a, D: Directory>(
    &'a self,
    directory: &'a D,
    local: &'a LocalContext,
    batch: &'a [PresenceRecord],
    at: DateTime<Local>,
  ) -> impl Iterator<Item = JoinEvent> + 'a {
    entrants(local, batch)
      .filter_map(move |record| self.resolve(directory, record, at).ok())
  }
}

impl Default for TransitionDetector {
  fn default() -> Self { Self::new(crate::config::DEFAULT_TIME_FORMAT) }
}
