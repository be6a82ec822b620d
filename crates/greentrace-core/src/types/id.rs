//! Newtype wrappers around [`uuid::Uuid`] for registry identifiers.
//!
//! Identifiers are UUIDv7: a 48-bit millisecond timestamp followed by
//! random bits, so ids minted in rapid succession stay distinct and sort
//! by creation time. Each type renders with a short prefix (`DOC-`,
//! `AUDIT-`) and parses with or without it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Macro to define a prefixed newtype ID wrapper around `Uuid`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Display prefix for this identifier type.
            pub const PREFIX: &'static str = $prefix;

            /// Create a new time-ordered identifier.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Create an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Return the inner UUID value.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Return a reference to the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", Self::PREFIX, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(Self::PREFIX).unwrap_or(s);
                Uuid::parse_str(raw).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a tracked document.
    DocumentId, "DOC-"
);

define_id!(
    /// Unique identifier for an audit trail entry.
    AuditEntryId, "AUDIT-"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_document_id_new() {
        let id1 = DocumentId::new();
        let id2 = DocumentId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_rapid_ids_are_distinct() {
        let ids: HashSet<DocumentId> = (0..10_000).map(|_| DocumentId::new()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_display_has_prefix() {
        let uuid = Uuid::now_v7();
        let id = DocumentId::from_uuid(uuid);
        assert_eq!(id.to_string(), format!("DOC-{uuid}"));
    }

    #[test]
    fn test_from_str_with_and_without_prefix() {
        let uuid = Uuid::now_v7();
        let prefixed: AuditEntryId = format!("AUDIT-{uuid}").parse().expect("should parse");
        let bare: AuditEntryId = uuid.to_string().parse().expect("should parse");
        assert_eq!(prefixed, bare);
        assert!("DOC-not-a-uuid".parse::<DocumentId>().is_err());
    }

    #[test]
    fn test_serde_uses_display_form() {
        let id = DocumentId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{id}\""));
        let parsed: DocumentId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
