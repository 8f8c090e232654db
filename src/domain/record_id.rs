use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Primary key of a vehicle or booking row.
///
/// The self-hosted schema keys rows by UUID while hosted tables use
/// integer identity columns. Both decode from JSON numbers or strings,
/// which also covers path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordId {
    Int(i64),
    Uuid(Uuid),
}

impl RecordId {
    pub fn new_v4() -> Self {
        RecordId::Uuid(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            RecordId::Uuid(id) => Some(*id),
            RecordId::Int(_) => None,
        }
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        RecordId::Uuid(id)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Uuid(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<i64>() {
            return Ok(RecordId::Int(id));
        }
        Uuid::parse_str(s)
            .map(RecordId::Uuid)
            .map_err(|_| format!("invalid record id: {}", s))
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordId::Int(id) => serializer.serialize_i64(*id),
            RecordId::Uuid(id) => id.serialize(serializer),
        }
    }
}

struct RecordIdVisitor;

impl Visitor<'_> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a UUID")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
        Ok(RecordId::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
        i64::try_from(v)
            .map(RecordId::Int)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_numbers_and_strings() {
        let id = Uuid::new_v4();

        assert_eq!(serde_json::from_str::<RecordId>("7").unwrap(), RecordId::Int(7));
        assert_eq!(serde_json::from_str::<RecordId>("\"7\"").unwrap(), RecordId::Int(7));
        assert_eq!(
            serde_json::from_str::<RecordId>(&format!("\"{}\"", id)).unwrap(),
            RecordId::Uuid(id)
        );
        assert!(serde_json::from_str::<RecordId>("\"car-7\"").is_err());
    }

    #[test]
    fn test_encodes_in_native_shape() {
        assert_eq!(serde_json::to_string(&RecordId::Int(42)).unwrap(), "42");

        let id = Uuid::new_v4();
        assert_eq!(
            serde_json::to_string(&RecordId::from(id)).unwrap(),
            format!("\"{}\"", id)
        );
        assert_eq!(RecordId::Int(42).to_string(), "42");
    }
}
