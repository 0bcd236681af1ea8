//! An in-memory host tree: a flat, ordered list of top-level elements.
//!
//! Besides implementing [`HostTree`] it can play the host's part, i.e.
//! re-render the toolbar (dropping anything it does not own) and take its
//! anchor away or bring it back.

use crate::{
  overlay::OverlayView,
  tree::{AnchorRef, Element, ElementBody, HostTree, ObserverHandle, TreeError},
};

#[derive(Debug, Default)]
pub struct MemoryTree {
  body:          Vec<Element>,
  observers:     Vec<ObserverHandle>,
  next_observer: u64,
  /// Structural changes since the last [`MemoryTree::take_mutations`].
  pending:       usize,
}

impl MemoryTree {
  pub fn new() -> Self { Self::default() }

  /// A tree holding a single anchor labelled `label`.
  pub fn with_anchor(label: &str) -> Self {
    let mut tree = Self::new();
    tree.add_anchor(label);
    tree
  }

  fn anchor_id(label: &str) -> String {
    format!("anchor-{}", label.to_lowercase().replace(' ', "-"))
  }

  pub fn add_anchor(&mut self, label: &str) {
    self.body.push(Element {
      id:         Self::anchor_id(label),
      class_name: Some("toolbar-icon".to_owned()),
      body:       ElementBody::Anchor {
        label: label.to_owned(),
      },
    });
    self.pending += 1;
  }

  pub fn remove_anchor(&mut self, label: &str) -> bool {
    self.remove(&Self::anchor_id(label))
  }

  /// The host redraws its toolbar: every entry-point is gone, host content
  /// and the overlay survive.
  pub fn rerender(&mut self) {
    self
      .body
      .retain(|el| !matches!(el.body, ElementBody::EntryPoint { .. }));
    self.pending += 1;
  }

  pub fn elements(&self) -> &[Element] { &self.body }

  pub fn get(&self, id: &str) -> Option<&Element> {
    self.body.iter().find(|el| el.id == id)
  }

  /// How many elements carry `id`.
  pub fn count(&self, id: &str) -> usize {
    self.body.iter().filter(|el| el.id == id).count()
  }

  pub fn position(&self, id: &str) -> Option<usize> {
    self.body.iter().position(|el| el.id == id)
  }

  pub fn overlay(&self) -> Option<&OverlayView> {
    self.body.iter().find_map(|el| match &el.body {
      ElementBody::Overlay(view) => Some(view),
      _ => None,
    })
  }

  pub fn is_observed(&self) -> bool { !self.observers.is_empty() }

  /// Drain the count of mutations the host would have reported.
  pub fn take_mutations(&mut self) -> usize { std::mem::take(&mut self.pending) }
}

impl HostTree for MemoryTree {
  fn contains(&self, id: &str) -> bool { self.get(id).is_some() }

  fn find_by_label(&self, label: &str) -> Option<AnchorRef> {
    self.body.iter().find_map(|el| match &el.body {
      ElementBody::Anchor { label: l } if l == label => Some(AnchorRef {
        id:         el.id.clone(),
        class_name: el.class_name.clone(),
      }),
      _ => None,
    })
  }

  fn insert_before(
    &mut self,
    anchor_id: &str,
    element: Element,
  ) -> Result<(), TreeError> {
    let index = self
      .position(anchor_id)
      .ok_or_else(|| TreeError::NotFound(anchor_id.to_owned()))?;
    self.body.insert(index, element);
    self.pending += 1;
    Ok(())
  }

  fn mount(&mut self, element: Element) {
    self.body.push(element);
    self.pending += 1;
  }

  fn remove(&mut self, id: &str) -> bool {
    match self.position(id) {
      Some(index) => {
        self.body.remove(index);
        self.pending += 1;
        true
      }
      None => false,
    }
  }

  fn observe(&mut self) -> ObserverHandle {
    self.next_observer += 1;
    let handle = ObserverHandle(self.next_observer);
    self.observers.push(handle);
    handle
  }

  fn disconnect(&mut self, handle: ObserverHandle) {
    self.observers.retain(|h| *h != handle);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn other(id: &str) -> Element {
    Element {
      id:         id.to_owned(),
      class_name: None,
      body:       ElementBody::Other,
    }
  }

  #[test]
  fn insert_before_places_element_ahead_of_anchor() {
    let mut tree = MemoryTree::new();
    tree.mount(other("title"));
    tree.add_anchor("Inbox");

    let anchor = tree.find_by_label("Inbox").unwrap();
    tree.insert_before(&anchor.id, other("mine")).unwrap();

    let ids: Vec<_> = tree.elements().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["title", "mine", "anchor-inbox"]);
  }

  #[test]
  fn insert_before_missing_anchor_fails() {
    let mut tree = MemoryTree::new();
    assert_eq!(
      tree.insert_before("nope", other("mine")),
      Err(TreeError::NotFound("nope".into()))
    );
  }

  #[test]
  fn mutations_are_counted_until_taken() {
    let mut tree = MemoryTree::with_anchor("Inbox");
    tree.mount(other("a"));
    tree.remove("a");
    assert_eq!(tree.take_mutations(), 3);
    assert_eq!(tree.take_mutations(), 0);
  }

  #[test]
  fn observers_can_disconnect() {
    let mut tree = MemoryTree::new();
    let a = tree.observe();
    let b = tree.observe();
    assert_ne!(a, b);
    tree.disconnect(a);
    assert!(tree.is_observed());
    tree.disconnect(b);
    assert!(!tree.is_observed());
  }
}
