//! The newline-framed JSON-RPC 2.0 envelope exchanged between connections.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcError;
use crate::identifiers::RequestId;

/// One line of the wire protocol. Exactly one of `(method, params?)` or
/// `(result | error)` is populated, per JSON-RPC 2.0's request/response/notification shapes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Envelope {
    pub jsonrpc: JsonRpcVersion,
    /// `None` means the `id` key was absent (a notification). `Some(RequestId::Null)`
    /// means the key was present with an explicit JSON `null` (a legal, if unusual,
    /// request id). `#[serde(deserialize_with)]` is required here: the derived
    /// `Option<RequestId>` deserializer would otherwise intercept a literal `null`
    /// in `deserialize_option` and produce `None` before `RequestId::deserialize`
    /// ever saw it, collapsing both cases together.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present_id"
    )]
    pub id: Option<RequestId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// Deserializes `id` only when the key is present in the map, delegating straight to
/// `RequestId::deserialize` so a present `null` yields `Some(RequestId::Null)` rather
/// than being swallowed as "key absent" by `Option<T>`'s usual `deserialize_option`.
fn deserialize_present_id<'de, D>(deserializer: D) -> Result<Option<RequestId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    RequestId::deserialize(deserializer).map(Some)
}

/// The literal `"2.0"` tag. A distinct type (rather than a bare `String`) keeps
/// malformed `jsonrpc` fields from silently round-tripping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JsonRpcVersion;

impl Default for JsonRpcVersion {
    fn default() -> Self {
        JsonRpcVersion
    }
}

impl Serialize for JsonRpcVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str("2.0")
    }
}

impl<'de> Deserialize<'de> for JsonRpcVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == "2.0" {
            Ok(JsonRpcVersion)
        } else {
            Err(serde::de::Error::custom(format!(
                "unsupported jsonrpc version `{s}`, expected \"2.0\""
            )))
        }
    }
}

impl Envelope {
    pub fn request(id: RequestId, method: impl Into<String>, params: Option<Value>) -> Self {
        Envelope {
            jsonrpc: JsonRpcVersion,
            id: Some(id),
            method: Some(method.into()),
            params,
            result: None,
            error: None,
        }
    }

    pub fn notification(method: impl Into<String>, params: Option<Value>) -> Self {
        Envelope {
            jsonrpc: JsonRpcVersion,
            id: None,
            method: Some(method.into()),
            params,
            result: None,
            error: None,
        }
    }

    pub fn response(id: RequestId, result: Value) -> Self {
        Envelope {
            jsonrpc: JsonRpcVersion,
            id: Some(id),
            method: None,
            params: None,
            result: Some(result),
            error: None,
        }
    }

    pub fn error_response(id: RequestId, error: RpcError) -> Self {
        Envelope {
            jsonrpc: JsonRpcVersion,
            id: Some(id),
            method: None,
            params: None,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_request(&self) -> bool {
        self.id.is_some() && self.method.is_some()
    }

    pub fn is_response(&self) -> bool {
        self.id.is_some() && self.method.is_none()
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none() && self.method.is_some()
    }
}
