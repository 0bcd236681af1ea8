//! Error types for `voxlog-core`.

use thiserror::Error;

use crate::ids::SubjectId;

#[derive(Debug, Error)]
pub enum Error {
  /// The directory had no profile for a subject seen in a presence batch.
  #[error("subject could not be resolved: {0}")]
  UnresolvedSubject(SubjectId),

  #[error("there's nothing to copy")]
  EmptyLogOnCopyAll,

  /// The element the entry-point is inserted next to is not in the tree.
  #[error("anchor {0:?} is not present in the host tree")]
  MissingAnchor(String),

  #[error("invalid time format {0:?}")]
  InvalidTimeFormat(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
