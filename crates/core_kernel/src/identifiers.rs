//! Identifiers for commission lines and deals
//!
//! Identifiers arrive from stored configuration and the CRM as opaque text,
//! so they wrap a `String` rather than a UUID. Freshly generated identifiers
//! use a prefixed time-ordered UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier as-is
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Creates a new time-ordered identifier (UUID v7)
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::now_v7().simple()))
            }

            /// Creates the positional identifier for a 1-based position
            pub fn positional(position: usize) -> Self {
                Self(format!("{}-{}", $prefix, position))
            }

            /// Returns the identifier text
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the identifier prefix
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(LineId, "line");
define_id!(DealId, "deal");
