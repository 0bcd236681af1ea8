//! Replay state and the single-threaded reaction loop.

use anyhow::Result;
use tokio::sync::mpsc;
use voxlog_core::config::PluginConfig;
use voxlog_surface::{
  HostTree, MemoryTree, Plugin,
  overlay::OverlayView,
  tree::ENTRY_POINT_ID,
};

use crate::{host::ReplayHost, script::Step, ui};

/// Why [`App::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
  /// The script ran out.
  Finished,
  Interrupted,
}

pub struct App {
  pub plugin:   Plugin<ReplayHost, MemoryTree>,
  anchor_label: String,
  /// The overlay as last printed, to avoid reprinting an unchanged one.
  shown:        Option<OverlayView>,
}

impl App {
  /// Build the host tree with its anchor and start the plugin.
  pub fn new(host: ReplayHost, config: &PluginConfig) -> Result<Self> {
    let tree = MemoryTree::with_anchor(&config.anchor_label);
    let mut plugin = Plugin::new(host, tree, config)?;
    plugin.start();
    Ok(Self {
      plugin,
      anchor_label: config.anchor_label.clone(),
      shown: None,
    })
  }

  /// React to one scripted event, then deliver any tree mutations it
  /// caused to the plugin.
  pub fn apply(&mut self, step: Step) {
    match step {
      Step::Presence { records } => {
        self.plugin.host().observe_self(&records);
        let joined = self.plugin.on_presence_batch(&records);
        tracing::debug!(records = records.len(), joined, "presence batch");
      }
      Step::Rerender => self.plugin.tree_mut().rerender(),
      Step::RemoveAnchor => {
        self.plugin.tree_mut().remove_anchor(&self.anchor_label);
      }
      Step::RestoreAnchor => self.plugin.tree_mut().add_anchor(&self.anchor_label),
      Step::RemoveEntryPoint => {
        self.plugin.tree_mut().remove(ENTRY_POINT_ID);
      }
      Step::Click(click) => {
        let propagation = self.plugin.on_intent(&click.intent());
        tracing::debug!(?click, ?propagation, "click");
      }
    }

    if self.plugin.tree_mut().take_mutations() > 0 {
      self.plugin.on_tree_mutation();
      // The watchdog's own insertion needs no second pass.
      self.plugin.tree_mut().take_mutations();
    }
    self.print_overlay();
  }

  fn print_overlay(&mut self) {
    let current = self.plugin.tree().overlay().cloned();
    if current != self.shown {
      match &current {
        Some(view) => println!("{}", ui::overlay_block(view)),
        None => println!("(overlay closed)"),
      }
      self.shown = current;
    }
  }

  /// Apply steps as they arrive until the sender hangs up or Ctrl-C.
  pub async fn run(&mut self, steps: &mut mpsc::Receiver<Step>) -> Result<Exit> {
    loop {
      tokio::select! {
        step = steps.recv() => match step {
          Some(step) => self.apply(step),
          None => return Ok(Exit::Finished),
        },
        signal = tokio::signal::ctrl_c() => {
          signal?;
          tracing::warn!("interrupted");
          return Ok(Exit::Interrupted);
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use voxlog_core::event::PresenceRecord;
  use voxlog_surface::OverlayState;

  use super::*;
  use crate::{script::Click, settings::ReplayConfig};

  fn app() -> App {
    let config: ReplayConfig = serde_json::from_value(serde_json::json!({
      "local_subject": "me",
      "subjects": [
        { "id": "1", "handle": "alice", "display_name": "Alice" },
        { "id": "2", "handle": "bob" },
      ],
    }))
    .unwrap();
    App::new(ReplayHost::new(&config), &config.plugin).unwrap()
  }

  fn moved(subject: &str, to: Option<&str>, from: Option<&str>) -> Step {
    Step::Presence {
      records: vec![PresenceRecord {
        subject_id:          subject.into(),
        channel_id:          to.map(Into::into),
        previous_channel_id: from.map(Into::into),
        group_id:            None,
      }],
    }
  }

  #[test]
  fn joins_count_only_after_local_user_enters() {
    let mut app = app();
    app.apply(moved("1", Some("C"), None));
    assert!(app.plugin.log().is_empty());

    app.apply(moved("me", Some("C"), None));
    app.apply(moved("2", Some("C"), None));
    app.apply(moved("1", Some("C"), Some("D")));

    let handles: Vec<_> = app.plugin.log().snapshot().map(|e| e.handle.clone()).collect();
    assert_eq!(handles, ["alice", "bob"]);
  }

  #[test]
  fn rerender_and_anchor_loss_are_repaired() {
    let mut app = app();
    assert!(app.plugin.tree().contains(ENTRY_POINT_ID));

    app.apply(Step::Rerender);
    assert_eq!(app.plugin.tree().count(ENTRY_POINT_ID), 1);

    app.apply(Step::RemoveAnchor);
    app.apply(Step::Rerender);
    assert!(!app.plugin.tree().contains(ENTRY_POINT_ID));

    app.apply(Step::RestoreAnchor);
    assert_eq!(app.plugin.tree().count(ENTRY_POINT_ID), 1);
  }

  #[test]
  fn removed_entry_point_is_restored_on_the_same_pass() {
    let mut app = app();
    app.apply(Step::RemoveEntryPoint);
    assert_eq!(app.plugin.tree().count(ENTRY_POINT_ID), 1);

    app.apply(Step::RemoveAnchor);
    app.apply(Step::RemoveEntryPoint);
    assert!(!app.plugin.tree().contains(ENTRY_POINT_ID));
  }

  #[test]
  fn bad_time_format_fails_to_build() {
    let config = PluginConfig {
      time_format: "%Q".into(),
      ..PluginConfig::default()
    };
    let host: ReplayHost = ReplayHost::new(
      &serde_json::from_value(serde_json::json!({ "local_subject": "me" })).unwrap(),
    );
    assert!(App::new(host, &config).is_err());
  }

  #[test]
  fn clicks_drive_the_overlay() {
    let mut app = app();
    app.apply(moved("me", Some("C"), None));
    app.apply(moved("1", Some("C"), None));

    app.apply(Step::Click(Click::EntryPoint));
    assert_eq!(app.plugin.overlay_state(), OverlayState::Visible);
    assert_eq!(app.shown.as_ref().map(|v| v.title.as_str()), Some("VC Logs (1)"));

    app.apply(Step::Click(Click::CopyId {
      subject_id: "1".into(),
    }));
    assert_eq!(app.plugin.host().copied(), ["1"]);

    app.apply(Step::Click(Click::Clear));
    assert_eq!(app.shown.as_ref().map(|v| v.title.as_str()), Some("VC Logs (0)"));

    app.apply(Step::Click(Click::Backdrop));
    assert_eq!(app.plugin.overlay_state(), OverlayState::Hidden);
    assert!(app.shown.is_none());
  }

  #[tokio::test]
  async fn run_drains_the_bus_until_closed() {
    let mut app = app();
    let (tx, mut rx) = mpsc::channel(8);
    tx.send(moved("me", Some("C"), None)).await.unwrap();
    tx.send(moved("1", Some("C"), None)).await.unwrap();
    tx.send(moved("2", Some("C"), None)).await.unwrap();
    drop(tx);

    let exit = app.run(&mut rx).await.unwrap();
    assert_eq!(exit, Exit::Finished);
    assert_eq!(app.plugin.log().len(), 2);
  }
}
