//! Extension method payloads, shared by both the agent and client traits.
//!
//! Wire methods prefixed with `_` are routed to a generic extension hook rather
//! than a named trait method. The inbound dispatcher builds an [`ExtRequest`] /
//! [`ExtNotification`] directly from the envelope's own `method` (with the
//! prefix stripped) and `params`; this is purely an in-process convenience for
//! the *receiving* side. Outbound extension calls (see
//! [`crate::agent_connection::AgentSideConnection::ext_method`] and its client
//! counterpart) send `params` directly under wire method `"_"+method` — they do
//! not re-wrap the body in another `ExtRequest` envelope.

use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct ExtRequest {
    pub method: String,
    pub params: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExtResponse(pub Value);

#[derive(Clone, Debug, PartialEq)]
pub struct ExtNotification {
    pub method: String,
    pub params: Value,
}
