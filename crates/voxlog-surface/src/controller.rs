//! Overlay lifecycle and the user actions it exposes.
//!
//! The overlay's visibility is whatever the host tree says: it is visible
//! exactly when an element with [`OVERLAY_ID`] exists. Every change to the
//! log while it is visible destroys and rebuilds the whole overlay from a
//! fresh snapshot; nothing is patched in place.

use strum::Display;
use voxlog_core::{
  Result, export,
  host::{Clipboard, Directory, Host, Notification, Notifier},
  ids::SubjectId,
  log::EventLog,
};

use crate::{
  overlay::OverlayView,
  tree::{Element, ElementBody, HostTree, OVERLAY_ID},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OverlayState {
  Hidden,
  Visible,
}

/// A user action on the entry-point or inside the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
  /// The entry-point was clicked.
  ToggleOverlay,
  /// Close button or a click on the backdrop.
  Dismiss,
  CopyAll,
  Clear,
  /// The copy button on one row.
  CopySubjectId(SubjectId),
}

/// Whether a click may continue to enclosing handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
  Continue,
  Stop,
}

#[derive(Debug, Default)]
pub struct SurfaceController;

impl SurfaceController {
  pub fn new() -> Self { Self }

  pub fn overlay_state(&self, tree: &impl HostTree) -> OverlayState {
    if tree.contains(OVERLAY_ID) {
      OverlayState::Visible
    } else {
      OverlayState::Hidden
    }
  }

  /// Destroy the overlay if it exists, otherwise build it from `log`.
  pub fn toggle(
    &self,
    tree: &mut impl HostTree,
    log: &EventLog,
    directory: &impl Directory,
  ) -> OverlayState {
    if tree.remove(OVERLAY_ID) {
      return OverlayState::Hidden;
    }
    self.build(tree, log, directory);
    OverlayState::Visible
  }

  /// Close the overlay. Returns whether it was open.
  pub fn dismiss(&self, tree: &mut impl HostTree) -> bool {
    tree.remove(OVERLAY_ID)
  }

  /// Rebuild the overlay from `log` if it is visible; no-op otherwise.
  pub fn refresh(
    &self,
    tree: &mut impl HostTree,
    log: &EventLog,
    directory: &impl Directory,
  ) -> bool {
    if !tree.remove(OVERLAY_ID) {
      return false;
    }
    self.build(tree, log, directory);
    true
  }

  fn build(
    &self,
    tree: &mut impl HostTree,
    log: &EventLog,
    directory: &impl Directory,
  ) {
    let view = OverlayView::build(log.snapshot(), directory);
    tree.mount(Element {
      id:         OVERLAY_ID.to_owned(),
      class_name: None,
      body:       ElementBody::Overlay(view),
    });
  }

  /// Copy every record to the clipboard, newest first. On an empty log
  /// nothing is written and an error toast is shown instead. Returns the
  /// number of records copied.
  pub fn copy_all<H>(&self, log: &EventLog, host: &H) -> Result<usize>
  where
    H: Notifier + Clipboard,
  {
    match export::copy_all_text(log.snapshot()) {
      Ok(text) => {
        host.copy(&text);
        host.notify(Notification::success("Success", "Copied all logs!"));
        Ok(log.len())
      }
      Err(e) => {
        host.notify(Notification::error("Error", "There's nothing to copy :)"));
        Err(e)
      }
    }
  }

  /// Empty the log and show the emptied overlay if it was open.
  pub fn clear(
    &self,
    tree: &mut impl HostTree,
    log: &mut EventLog,
    directory: &impl Directory,
  ) {
    let dropped = log.len();
    log.clear();
    tracing::info!(dropped, "join log cleared");
    self.refresh(tree, log, directory);
  }

  pub fn copy_subject_id<H>(&self, subject: &SubjectId, host: &H)
  where
    H: Notifier + Clipboard,
  {
    host.copy(subject.as_str());
    host.notify(Notification::success("Copied", "User ID copied"));
  }

  /// Dispatch one user action.
  ///
  /// Entry-point and copy-id clicks stop propagation so the host (or the
  /// enclosing row) never sees them.
  pub fn handle<H: Host>(
    &self,
    intent: &Intent,
    tree: &mut impl HostTree,
    log: &mut EventLog,
    host: &H,
  ) -> Propagation {
    match intent {
      Intent::ToggleOverlay => {
        self.toggle(tree, log, host);
        Propagation::Stop
      }
      Intent::Dismiss => {
        self.dismiss(tree);
        Propagation::Continue
      }
      Intent::CopyAll => {
        // The error toast is the whole of the failure handling.
        let _ = self.copy_all(log, host);
        Propagation::Continue
      }
      Intent::Clear => {
        self.clear(tree, log, host);
        Propagation::Continue
      }
      Intent::CopySubjectId(subject) => {
        self.copy_subject_id(subject, host);
        Propagation::Stop
      }
    }
  }

  /// Force the overlay closed.
  pub fn teardown(&self, tree: &mut impl HostTree) { self.dismiss(tree); }
}
