//! Newtype identifiers used throughout the protocol's typed payloads, plus the
//! polymorphic [`RequestId`] used as the JSON-RPC correlation key.

use std::fmt;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

macro_rules! string_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(SessionId, "Uniquely identifies a session.");
string_id!(AuthMethodId, "Identifies an authentication method offered by the agent.");
string_id!(PermissionOptionId, "Identifies one option within a permission request.");
string_id!(TerminalId, "Identifies a terminal created via the client's terminal surface.");
string_id!(ModelId, "Identifies a model the agent can run a session against.");
string_id!(SessionModeId, "Identifies one of a session's selectable modes.");

/// A JSON-RPC request id: an integer, a string, or `null`.
///
/// `null` only ever appears on the wire; it is never minted locally and is not a
/// valid pending-table key (see [`Connection::request`](crate::connection::Connection::request)).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RequestId {
    Integer(i64),
    String(String),
    Null,
}

impl RequestId {
    pub fn is_null(&self) -> bool {
        matches!(self, RequestId::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RequestId::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RequestId::String(v) => Some(v),
            _ => None,
        }
    }

    /// Canonical string form used as the pending-request table key. Distinguishes
    /// `Integer(1)` from `String("1")` by tagging each variant.
    pub fn canonical_key(&self) -> String {
        match self {
            RequestId::Integer(v) => format!("i:{v}"),
            RequestId::String(v) => format!("s:{v}"),
            RequestId::Null => "n:".to_string(),
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Integer(v) => write!(f, "{v}"),
            RequestId::String(v) => write!(f, "{v}"),
            RequestId::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        RequestId::Integer(value)
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        RequestId::String(value)
    }
}

impl Serialize for RequestId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RequestId::Integer(v) => serializer.serialize_i64(*v),
            RequestId::String(v) => serializer.serialize_str(v),
            RequestId::Null => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(RequestId::Null),
            Value::Number(n) => n
                .as_i64()
                .map(RequestId::Integer)
                .ok_or_else(|| D::Error::custom("request id number out of i64 range")),
            Value::String(s) => Ok(RequestId::String(s)),
            other => Err(D::Error::custom(format!(
                "request id must be a string, number, or null, got {other}"
            ))),
        }
    }
}
