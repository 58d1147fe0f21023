//! Opaque identifiers for boards, columns, tasks and users
//!
//! Identifiers coming from the backend are accepted verbatim, padding and
//! inner spaces included: the engine never looks inside them and only an
//! empty string is refused. Identifiers minted locally (by the file-backed
//! collaborator) use the format `{prefix}-{7-char-hash}`:
//! - Board IDs: `b-{hash}` (e.g., `b-7f2b4c1`)
//! - Column IDs: `c-{hash}` (e.g., `c-9d3e5f2`)
//! - Task IDs: `t-{hash}` (e.g., `t-04ab19e`)
//!
//! Hash is derived from title + creation timestamp, so the same title
//! created twice yields two different IDs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid {kind} ID: must not be empty")]
    Empty { kind: &'static str },
}

/// Generates a 7-character hash from title and timestamp
fn generate_hash(title: &str, timestamp: DateTime<Utc>) -> String {
    let input = format!("{}{}", title, timestamp.timestamp_nanos_opt().unwrap_or(0));
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Accepts any non-empty string as-is
fn verbatim(kind: &'static str, raw: String) -> Result<String, IdError> {
    if raw.is_empty() {
        return Err(IdError::Empty { kind });
    }
    Ok(raw)
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Mints a fresh ID from a title and creation timestamp
            pub fn generate(title: &str, timestamp: DateTime<Utc>) -> Self {
                Self(format!("{}-{}", $prefix, generate_hash(title, timestamp)))
            }

            /// Returns the raw ID string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        /// Parses typed input (CLI arguments): surrounding whitespace is trimmed
        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                verbatim($kind, s.trim().to_string()).map(Self)
            }
        }

        /// Takes a backend ID verbatim
        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                verbatim($kind, value).map(Self)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Identifier of a board
    BoardId,
    "board",
    "b"
);

opaque_id!(
    /// Identifier of a column, unique within its board
    ColumnId,
    "column",
    "c"
);

opaque_id!(
    /// Identifier of a task, unique within its board
    TaskId,
    "task",
    "t"
);

opaque_id!(
    /// Reference to a user that a task can be assigned to
    UserId,
    "user",
    "u"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_prefix() {
        let now = Utc::now();
        let column = ColumnId::generate("Backlog", now);
        let task = TaskId::generate("Write docs", now);

        assert!(column.as_str().starts_with("c-"));
        assert_eq!(column.as_str().len(), 9);
        assert!(task.as_str().starts_with("t-"));
    }

    #[test]
    fn same_title_different_time_differs() {
        let t1 = Utc::now();
        let t2 = t1 + chrono::Duration::nanoseconds(1);

        assert_ne!(TaskId::generate("Same", t1), TaskId::generate("Same", t2));
    }

    #[test]
    fn parse_accepts_opaque_backend_ids() {
        let id: TaskId = "6f1c2a10-0d4e-4b8e-a0a1-3c2b1d0e9f77".parse().unwrap();
        assert_eq!(id.to_string(), "6f1c2a10-0d4e-4b8e-a0a1-3c2b1d0e9f77");

        let trimmed: ColumnId = "  col-1 ".parse().unwrap();
        assert_eq!(trimmed.as_str(), "col-1");
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(
            "   ".parse::<BoardId>(),
            Err(IdError::Empty { kind: "board" })
        );
        assert_eq!("Jane Doe".parse::<UserId>().unwrap().as_str(), "Jane Doe");
    }

    #[test]
    fn backend_ids_are_kept_verbatim() {
        let padded = ColumnId::try_from(" col-1".to_string()).unwrap();
        assert_eq!(padded.as_str(), " col-1");

        let spaced: UserId = serde_json::from_str("\"Jane Doe\"").unwrap();
        assert_eq!(spaced.as_str(), "Jane Doe");
        assert_eq!(serde_json::to_string(&padded).unwrap(), "\" col-1\"");
    }

    #[test]
    fn serde_roundtrip_is_plain_string() {
        let id: ColumnId = "c-1234567".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"c-1234567\"");

        let back: ColumnId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<ColumnId>("\"\"").is_err());
    }
}
