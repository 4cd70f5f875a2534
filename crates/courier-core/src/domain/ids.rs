//! Domain identifiers.
//!
//! Message ids are ULIDs (Universally Unique Lexicographically Sortable
//! Identifiers):
//! - sortable by creation time (timestamp is the leading component)
//! - generated without coordination across tasks or nodes
//! - 128-bit, UUID-sized

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifier of a message request, assigned at intake and immutable
/// for the lifetime of the record.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Ulid);

impl MessageId {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for MessageId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sortable_by_creation_time() {
        let id1 = MessageId::from_ulid(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = MessageId::from_ulid(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id3 = MessageId::from_ulid(Ulid::new());

        assert!(id1 < id2);
        assert!(id2 < id3);
    }

    #[test]
    fn ids_serialize_as_plain_ulid_strings() {
        let ulid = Ulid::new();
        let id = MessageId::from_ulid(ulid);

        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, format!("\"{ulid}\""));

        let deserialized: MessageId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn id_is_ulid_sized() {
        use std::mem::size_of;
        assert_eq!(size_of::<MessageId>(), size_of::<Ulid>());
    }
}
