//! The ACP wire version type.
//!
//! Encoded as a bare JSON number on the wire. Decoding also accepts the legacy
//! string form some early peers sent, mapping it to [`ProtocolVersion::V0`].

use std::fmt;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion(u16);

impl ProtocolVersion {
    pub const V0: ProtocolVersion = ProtocolVersion(0);
    pub const V1: ProtocolVersion = ProtocolVersion(1);
    pub const CURRENT: ProtocolVersion = ProtocolVersion::V1;

    pub fn new(value: u16) -> Self {
        ProtocolVersion(value)
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ProtocolVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.0)
    }
}

impl<'de> Deserialize<'de> for ProtocolVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(_) => Ok(ProtocolVersion::V0),
            Value::Number(n) => {
                let value = n
                    .as_u64()
                    .ok_or_else(|| D::Error::custom("protocol version must be non-negative"))?;
                let value = u16::try_from(value)
                    .map_err(|_| D::Error::custom("protocol version out of u16 range"))?;
                Ok(ProtocolVersion(value))
            }
            other => Err(D::Error::custom(format!(
                "protocol version must be a string or number, got {other}"
            ))),
        }
    }
}
