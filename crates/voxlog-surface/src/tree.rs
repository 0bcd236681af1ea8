//! The host's rendered tree, reduced to the operations the logger needs.

use thiserror::Error;

use crate::overlay::OverlayView;

/// Stable id of the overlay root.
pub const OVERLAY_ID: &str = "voxlog-overlay";

/// Stable id of the persistent entry-point control.
pub const ENTRY_POINT_ID: &str = "voxlog-entry-point";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementBody {
  /// A host-owned control identified by its accessible label.
  Anchor { label: String },
  EntryPoint { label: String },
  Overlay(OverlayView),
  /// Any other host content.
  Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  pub id:         String,
  /// Copied from the anchor so the entry-point blends into the toolbar.
  pub class_name: Option<String>,
  pub body:       ElementBody,
}

/// Enough of an anchor element to position something beside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRef {
  pub id:         String,
  pub class_name: Option<String>,
}

/// Token for an active mutation subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(pub u64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
  #[error("no element with id {0:?}")]
  NotFound(String),
}

pub trait HostTree {
  fn contains(&self, id: &str) -> bool;

  /// First element whose accessible label is `label`.
  fn find_by_label(&self, label: &str) -> Option<AnchorRef>;

  /// Insert `element` as the sibling immediately before `anchor_id`.
  fn insert_before(
    &mut self,
    anchor_id: &str,
    element: Element,
  ) -> Result<(), TreeError>;

  /// Append `element` to the document root.
  fn mount(&mut self, element: Element);

  /// Remove the element with `id`. Returns whether anything was removed.
  fn remove(&mut self, id: &str) -> bool;

  /// Start receiving structural-mutation notifications.
  fn observe(&mut self) -> ObserverHandle;

  fn disconnect(&mut self, handle: ObserverHandle);
}
