#![forbid(unsafe_code)]
//! A bidirectional JSON-RPC 2.0 runtime for the Agent Client Protocol (ACP).
//!
//! ACP connects an agent process to a client process (an editor, a CLI host,
//! an IDE plugin) over a pair of byte streams carrying newline-delimited
//! JSON-RPC 2.0 messages. Either side can issue requests and notifications to
//! the other over the same connection; there is no special "server" role.
//!
//! ## Setup
//! - An agent process holds an [`AgentSideConnection`], built from an
//!   [`Agent`] implementation plus a reader/writer pair (typically stdin/stdout,
//!   or a [`tokio::io::duplex`] pair in tests). It receives `initialize`,
//!   `session/new`, `session/prompt`, and related calls from the client, and
//!   can in turn call back into the client for permission, file I/O, and
//!   terminal access.
//! - A client process holds a [`ClientSideConnection`], built from a
//!   [`Client`] implementation plus the same kind of reader/writer pair. It
//!   receives `session/update`, `session/request_permission`, `fs/*`, and
//!   `terminal/*` calls from the agent, and issues the `initialize`/`session/*`
//!   calls the other way.
//! - Both façades expose [`subscribe`](AgentSideConnection::subscribe) for a
//!   best-effort observer feed of every envelope crossing the wire, and
//!   `ext_method`/`ext_notification` for protocol extensions carried under a
//!   `_`-prefixed wire method.
//!
//! ## Errors
//! Transport- and engine-level failures (serialization, a closed channel, a
//! peer-returned JSON-RPC error) surface as [`Error`]. Handler implementations
//! report protocol-level failures as [`RpcError`], the JSON-RPC error object
//! itself.
//!
//! ## Concurrency
//! Each connection runs one writer task and one reader task. Every inbound
//! request or notification is dispatched onto its own task so a slow handler
//! cannot stall the read loop or other in-flight handlers. Outbound writes go
//! through a single bounded channel and stay FIFO, but there is no ordering
//! guarantee across when two concurrently dispatched inbound handlers finish.

mod agent;
mod agent_connection;
mod agent_inbound;
pub mod agent_types;
mod client;
mod client_connection;
mod client_inbound;
pub mod client_types;
pub mod connection;
pub mod content;
mod dispatch;
pub mod envelope;
pub mod error;
pub mod ext;
pub mod identifiers;
pub mod methods;
mod path;
pub mod stream;
pub mod version;

pub use agent::{Agent, UnimplementedAgent};
pub use agent_connection::AgentSideConnection;
pub use client::{Client, UnimplementedClient};
pub use client_connection::ClientSideConnection;
pub use error::{Error, RpcError};
pub use stream::{StreamMessage, StreamMessageContent, StreamMessageDirection, StreamReceiver};
pub use version::ProtocolVersion;
