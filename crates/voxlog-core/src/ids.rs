//! Opaque identifiers handed to us by the host.
//!
//! The host uses snowflake ids; they are carried as strings and never
//! parsed or compared other than for equality.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

      pub fn as_str(&self) -> &str { &self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl From<&str> for $name {
      fn from(id: &str) -> Self { Self(id.to_owned()) }
    }

    impl From<String> for $name {
      fn from(id: String) -> Self { Self(id) }
    }
  };
}

string_id!(
  /// A participant (user) id.
  SubjectId
);
string_id!(
  /// A voice channel id.
  ChannelId
);
string_id!(
  /// The group (guild) a voice channel belongs to.
  GroupId
);
