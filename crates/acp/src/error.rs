use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Standard JSON-RPC 2.0 error code: malformed JSON was received.
pub const CODE_PARSE_ERROR: i32 = -32700;
/// Standard JSON-RPC 2.0 error code: the envelope was not a valid request.
pub const CODE_INVALID_REQUEST: i32 = -32600;
/// Standard JSON-RPC 2.0 error code: no handler is bound to the method.
pub const CODE_METHOD_NOT_FOUND: i32 = -32601;
/// Standard JSON-RPC 2.0 error code: params failed to decode into the expected shape.
pub const CODE_INVALID_PARAMS: i32 = -32602;
/// Standard JSON-RPC 2.0 error code: the handler or engine failed unexpectedly.
pub const CODE_INTERNAL_ERROR: i32 = -32603;
/// ACP domain error code: the peer must authenticate before continuing.
pub const CODE_AUTH_REQUIRED: i32 = -32000;
/// ACP domain error code: a referenced resource does not exist.
pub const CODE_RESOURCE_NOT_FOUND: i32 = -32002;

/// A JSON-RPC 2.0 error object, `{code, message, data?}`.
///
/// The zero-code, empty-message value ([`RpcError::none`]) is the internal sentinel
/// inbound dispatch uses to mean "no error, send `result`". It is never written to the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.code == 0 && self.message.is_empty()
    }

    fn code(code: i32, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn parse_error() -> Self {
        Self::code(CODE_PARSE_ERROR, "Parse error")
    }

    pub fn invalid_request() -> Self {
        Self::code(CODE_INVALID_REQUEST, "Invalid Request")
    }

    pub fn method_not_found() -> Self {
        Self::code(CODE_METHOD_NOT_FOUND, "Method not found")
    }

    pub fn invalid_params() -> Self {
        Self::code(CODE_INVALID_PARAMS, "Invalid params")
    }

    pub fn internal_error() -> Self {
        Self::code(CODE_INTERNAL_ERROR, "Internal error")
    }

    pub fn auth_required() -> Self {
        Self::code(CODE_AUTH_REQUIRED, "Authentication required")
    }

    pub fn resource_not_found(uri: Option<&str>) -> Self {
        let err = Self::code(CODE_RESOURCE_NOT_FOUND, "Resource not found");
        match uri {
            Some(uri) => err.with_data(serde_json::json!({ "uri": uri })),
            None => err,
        }
    }

    /// Returns a copy of this error carrying `data` as its payload.
    ///
    /// A marshalling failure degrades to a quoted error string rather than panicking.
    pub fn with_data<T: Serialize>(mut self, data: T) -> Self {
        self.data = Some(marshal_or_stringify(data));
        self
    }

    /// Wraps an arbitrary error as `internal error`, attaching its `Display` text as `data`.
    pub fn internal(err: impl fmt::Display) -> Self {
        Self::internal_error().with_data(err.to_string())
    }
}

fn marshal_or_stringify<T: Serialize>(value: T) -> Value {
    serde_json::to_value(&value).unwrap_or_else(|err| Value::String(err.to_string()))
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            return write!(f, "{}", self.code);
        }
        match &self.data {
            Some(data) => write!(f, "{}: {}", self.message, data),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for RpcError {}

/// Errors surfaced by the connection engine itself, distinct from [`RpcError`]
/// (which travels over the wire as a JSON-RPC error object).
#[derive(Debug, Error)]
pub enum Error {
    /// The peer responded with a JSON-RPC error object.
    #[error("peer returned an error: {0}")]
    Rpc(#[from] RpcError),
    #[error("failed to serialize request/response: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("connection closed: {0}")]
    Closed(String),
    #[error("call timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("transport channel closed unexpectedly")]
    ChannelClosed,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wraps an arbitrary handler error as an internal [`RpcError`], mirroring
    /// [`RpcError::internal`] for non-`RpcError` failures bubbling out of a handler.
    pub fn internal(err: impl fmt::Display) -> RpcError {
        RpcError::internal(err)
    }
}
