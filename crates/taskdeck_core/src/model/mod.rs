//! Domain model for tasks and their satellite records.
//!
//! # Responsibility
//! - Define canonical records exchanged between core and its callers.
//! - Define typed partial-update payloads (`*Patch`) per entity.
//!
//! # Invariants
//! - Every record is identified by an opaque caller-supplied string id.
//! - Timestamps are Unix epoch milliseconds.
//! - Patch fields set to `None` are left untouched by storage updates.
//!
//! # See also
//! - validation.rs for field-level rules.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Opaque record identifier.
pub type RecordId = String;

/// Generates a fresh identifier for callers that do not bring their own.
pub fn new_id() -> RecordId {
    Uuid::new_v4().to_string()
}

/// Returns the current wall clock as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Textual value outside of a closed enum set.
///
/// `Display` renders the same message the validation module reports for
/// the field, so callers can surface it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub message: &'static str,
    pub value: String,
}

impl Display for ParseEnumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ParseEnumError {}

/// Declares `as_str`, `FromStr` and `Display` for a closed string enum.
macro_rules! string_enum {
    ($name:ident, $message:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Persisted/wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::ParseEnumError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::model::ParseEnumError {
                        message: $message,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod attachment;
pub mod category;
pub mod preferences;
pub mod reminder;
pub mod subtask;
pub mod task;
