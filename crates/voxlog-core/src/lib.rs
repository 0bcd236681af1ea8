//! Core types and logic for the voice-channel join logger.
//!
//! This crate knows nothing about the host's rendered tree. It turns raw
//! presence batches into [`event::JoinEvent`]s, keeps them in an
//! [`log::EventLog`], and defines the traits through which the host's
//! directory, session, notification and clipboard services are reached.

pub mod config;
pub mod detector;
pub mod error;
pub mod event;
pub mod export;
pub mod host;
pub mod ids;
pub mod log;

pub use error::{Error, Result};
