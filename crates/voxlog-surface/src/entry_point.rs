//! The persistent toolbar control that opens the log viewer, and the
//! watchdog that puts it back whenever the host re-renders it away.
//!
//! After the watchdog starts, the entry-point is present whenever its
//! anchor is, and there is never more than one.

use voxlog_core::{Error, Result};

use crate::tree::{ENTRY_POINT_ID, Element, ElementBody, HostTree, ObserverHandle};

pub const ENTRY_POINT_LABEL: &str = "VC Logger";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
  Inserted,
  AlreadyPresent,
}

#[derive(Debug, Clone)]
pub struct EntryPoint {
  anchor_label: String,
}

impl EntryPoint {
  pub fn new(anchor_label: impl Into<String>) -> Self {
    Self {
      anchor_label: anchor_label.into(),
    }
  }

  pub fn anchor_label(&self) -> &str { &self.anchor_label }

  /// Insert the control just before the anchor, unless one is already
  /// there.
  pub fn inject(&self, tree: &mut impl HostTree) -> Result<Injection> {
    let anchor = tree
      .find_by_label(&self.anchor_label)
      .ok_or_else(|| Error::MissingAnchor(self.anchor_label.clone()))?;

    if tree.contains(ENTRY_POINT_ID) {
      return Ok(Injection::AlreadyPresent);
    }

    let element = Element {
      id:         ENTRY_POINT_ID.to_owned(),
      class_name: anchor.class_name,
      body:       ElementBody::EntryPoint {
        label: ENTRY_POINT_LABEL.to_owned(),
      },
    };
    tree
      .insert_before(&anchor.id, element)
      .map_err(|_| Error::MissingAnchor(self.anchor_label.clone()))?;
    Ok(Injection::Inserted)
  }

  /// Take the control out of the tree, if it is there.
  pub fn remove(&self, tree: &mut impl HostTree) -> bool {
    tree.remove(ENTRY_POINT_ID)
  }
}

/// Holds the mutation subscription for as long as the plugin runs.
#[derive(Debug)]
pub struct Watchdog {
  entry_point: EntryPoint,
  handle:      Option<ObserverHandle>,
}

impl Watchdog {
  pub fn new(entry_point: EntryPoint) -> Self {
    Self {
      entry_point,
      handle: None,
    }
  }

  pub fn is_running(&self) -> bool { self.handle.is_some() }

  /// Subscribe to mutations and make a first injection attempt.
  pub fn start(&mut self, tree: &mut impl HostTree) {
    if self.handle.is_none() {
      self.handle = Some(tree.observe());
    }
    self.tick(tree);
  }

  /// React to one mutation notification. Ignored when not running.
  pub fn on_mutation(&self, tree: &mut impl HostTree) {
    if self.is_running() && !tree.contains(ENTRY_POINT_ID) {
      self.tick(tree);
    }
  }

  fn tick(&self, tree: &mut impl HostTree) {
    match self.entry_point.inject(tree) {
      Ok(Injection::Inserted) => tracing::debug!("entry-point injected"),
      Ok(Injection::AlreadyPresent) => {}
      Err(e) => tracing::debug!(error = %e, "entry-point injection skipped"),
    }
  }

  /// Unsubscribe and remove the control. Safe to call more than once.
  pub fn stop(&mut self, tree: &mut impl HostTree) {
    if let Some(handle) = self.handle.take() {
      tree.disconnect(handle);
    }
    self.entry_point.remove(tree);
  }
}
