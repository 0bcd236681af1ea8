//! The on-screen side of the join logger.
//!
//! Everything here talks to the host's rendered tree through [`HostTree`],
//! so the controller and the entry-point watchdog can be driven against
//! [`MemoryTree`] in tests exactly as they would against the real host.

pub mod controller;
pub mod entry_point;
pub mod memory;
pub mod overlay;
pub mod plugin;
pub mod tree;

pub use controller::{Intent, OverlayState, Propagation, SurfaceController};
pub use memory::MemoryTree;
pub use plugin::Plugin;
pub use tree::HostTree;
