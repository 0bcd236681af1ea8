//! Process-wide lifecycle: owns the log and wires the detector, the
//! controller and the watchdog to the host.
//!
//! All entry points run to completion on the caller's thread. A snapshot
//! taken while rendering therefore always sees the log in a single state.

use chrono::{DateTime, Local};
use voxlog_core::{
  Result,
  config::PluginConfig,
  detector::{LocalContext, TransitionDetector},
  event::PresenceRecord,
  host::{Host, Notification},
  log::EventLog,
};

use crate::{
  controller::{Intent, OverlayState, Propagation, SurfaceController},
  entry_point::{EntryPoint, Watchdog},
  tree::HostTree,
};

pub struct Plugin<H: Host, T: HostTree> {
  host:     H,
  tree:     T,
  log:      EventLog,
  detector: TransitionDetector,
  surface:  SurfaceController,
  watchdog: Watchdog,
  running:  bool,
}

impl<H: Host, T: HostTree> Plugin<H, T> {
  /// Fails when `config` would make a later reaction fail, e.g. an
  /// unusable time format.
  pub fn new(host: H, tree: T, config: &PluginConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self {
      host,
      tree,
      log: EventLog::with_capacity_limit(config.max_entries),
      detector: TransitionDetector::new(config.time_format.clone()),
      surface: SurfaceController::new(),
      watchdog: Watchdog::new(EntryPoint::new(config.anchor_label.clone())),
      running: false,
    })
  }

  pub fn is_running(&self) -> bool { self.running }

  pub fn log(&self) -> &EventLog { &self.log }

  pub fn host(&self) -> &H { &self.host }

  pub fn tree(&self) -> &T { &self.tree }

  /// The host side of the tree may be changed freely; follow up with
  /// [`Plugin::on_tree_mutation`] as the host's observer would.
  pub fn tree_mut(&mut self) -> &mut T { &mut self.tree }

  pub fn overlay_state(&self) -> OverlayState {
    self.surface.overlay_state(&self.tree)
  }

  /// Subscribe to tree mutations and place the entry-point.
  pub fn start(&mut self) {
    if self.running {
      return;
    }
    self.running = true;
    self.watchdog.start(&mut self.tree);
    tracing::info!("join logger started");
  }

  /// Handle one presence batch, stamping joins with the current time.
  /// Returns how many joins were recorded.
  pub fn on_presence_batch(&mut self, batch: &[PresenceRecord]) -> usize {
    self.on_presence_batch_at(batch, Local::now())
  }

  pub fn on_presence_batch_at(
    &mut self,
    batch: &[PresenceRecord],
    at: DateTime<Local>,
  ) -> usize {
    if !self.running {
      return 0;
    }
    let local = LocalContext::from_session(&self.host);
    let joins: Vec<_> = self
      .detector
      .detect(&self.host, &local, batch, at)
      .collect();

    for event in &joins {
      tracing::info!(
        subject = %event.subject_id,
        handle = %event.handle,
        "participant joined"
      );
      self.log.prepend(event.clone());
      self.surface.refresh(&mut self.tree, &self.log, &self.host);

      let icon = self
        .host
        .resolve_subject(&event.subject_id)
        .and_then(|profile| profile.avatar);
      self.host.notify(
        Notification::success(
          "User Logged",
          format!("{} joined", event.display_name),
        )
        .with_icon(icon),
      );
    }
    joins.len()
  }

  /// The host's tree changed structurally.
  pub fn on_tree_mutation(&mut self) {
    self.watchdog.on_mutation(&mut self.tree);
  }

  /// Dispatch a user action. Ignored once stopped, so nothing can be
  /// mounted that a later stop would not release.
  pub fn on_intent(&mut self, intent: &Intent) -> Propagation {
    if !self.running {
      return Propagation::Continue;
    }
    self
      .surface
      .handle(intent, &mut self.tree, &mut self.log, &self.host)
  }

  /// Unsubscribe, remove both surfaces and forget the log. Idempotent.
  pub fn stop(&mut self) {
    if !self.running {
      return;
    }
    self.running = false;
    self.watchdog.stop(&mut self.tree);
    self.surface.teardown(&mut self.tree);
    self.log.clear();
    tracing::info!("join logger stopped");
  }
}

impl<H: Host, T: HostTree> Drop for Plugin<H, T> {
  fn drop(&mut self) { self.stop(); }
}
