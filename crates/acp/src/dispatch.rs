//! Shared helpers for decoding inbound request/notification params.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::RpcError;

/// Decodes `params` into `T`, rejecting a missing/`null` payload as `invalid params`.
pub(crate) fn decode_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, RpcError> {
    let Some(params) = params else {
        return Err(RpcError::invalid_params().with_data("params must not be empty"));
    };
    serde_json::from_value(params).map_err(|err| RpcError::invalid_params().with_data(err.to_string()))
}
