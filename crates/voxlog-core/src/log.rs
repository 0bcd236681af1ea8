//! The in-memory join log.
//!
//! Newest entries sit at the front. There is no edit, delete-by-id or
//! search; the only mutations are [`EventLog::prepend`] and
//! [`EventLog::clear`], and both complete without yielding, so a
//! [`EventLog::snapshot`] taken in the same reaction is always consistent.

use std::{collections::VecDeque, num::NonZeroUsize};

use crate::event::JoinEvent;

#[derive(Debug, Default)]
pub struct EventLog {
  entries:  VecDeque<JoinEvent>,
  capacity: Option<NonZeroUsize>,
}

impl EventLog {
  /// An empty, unbounded log.
  pub fn new() -> Self { Self::default() }

  /// An empty log that drops its oldest entry once `capacity` is exceeded.
  pub fn with_capacity_limit(capacity: Option<NonZeroUsize>) -> Self {
    Self {
      entries: VecDeque::new(),
      capacity,
    }
  }

  /// Insert `event` as the newest entry. Returns the evicted oldest entry
  /// when a capacity limit is set and was exceeded.
  pub fn prepend(&mut self, event: JoinEvent) -> Option<JoinEvent> {
    self.entries.push_front(event);
    let limit = self.capacity?.get();
    if self.entries.len() > limit {
      let evicted = self.entries.pop_back();
      if let Some(old) = &evicted {
        tracing::trace!(event_id = %old.event_id, "evicted oldest join event");
      }
      evicted
    } else {
      None
    }
  }

  pub fn clear(&mut self) { self.entries.clear(); }

  /// The current entries, newest first.
  pub fn snapshot(&self) -> impl ExactSizeIterator<Item = &JoinEvent> + '_ {
    self.entries.iter()
  }

  pub fn latest(&self) -> Option<&JoinEvent> { self.entries.front() }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
