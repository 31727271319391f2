//! The bidirectional JSON-RPC 2.0 engine: newline framing, outbound
//! correlation, and per-message inbound dispatch.
//!
//! One connection owns exactly one writer task and one reader task. Every
//! inbound request or notification is dispatched onto its own task, so a slow
//! handler never blocks the read loop or other in-flight handlers; outbound
//! writes stay FIFO through a single bounded channel, so there is no ordering
//! guarantee across when two inbound handlers happen to finish.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::envelope::Envelope;
use crate::error::{Error, RpcError};
use crate::identifiers::RequestId;
use crate::stream::{StreamBroadcast, StreamReceiver};

const OUTGOING_CAPACITY: usize = 32;

/// What an inbound request/notification dispatcher does with a decoded method.
///
/// Implemented by the agent-side and client-side routers
/// ([`crate::agent_inbound`], [`crate::client_inbound`]); the engine itself
/// knows nothing about ACP's method names or typed payloads.
#[async_trait::async_trait]
pub trait InboundHandler: Send + Sync + 'static {
    /// Handles a request, returning the JSON-RPC result or error to send back.
    async fn handle_request(&self, method: &str, params: Option<Value>) -> (Option<Value>, RpcError);

    /// Handles a notification. No response is ever sent; a returned error is
    /// only used for tracing.
    async fn handle_notification(&self, method: &str, params: Option<Value>) -> RpcError;
}

struct PendingRequest {
    reply: oneshot::Sender<Result<Value, RpcError>>,
}

/// Owns the write half, read half, pending-request table, and stream bus for
/// one peer-to-peer connection. Shared behind an `Arc` by the
/// [`crate::agent_connection::AgentSideConnection`] /
/// [`crate::client_connection::ClientSideConnection`] façades.
pub struct Connection {
    outgoing: mpsc::Sender<Envelope>,
    pending: Mutex<HashMap<String, PendingRequest>>,
    next_id: AtomicI64,
    broadcast: StreamBroadcast,
    close: tokio::sync::OnceCell<()>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Connection {
    /// Spawns the writer and reader tasks and returns a connection ready to
    /// issue and receive calls. `handler` processes inbound requests and
    /// notifications; `reader`/`writer` are the framed newline-delimited
    /// transport, typically process stdio or an in-memory duplex in tests.
    pub fn spawn<H, R, W>(handler: H, reader: R, writer: W) -> Arc<Self>
    where
        H: InboundHandler,
        R: tokio::io::AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (outgoing_tx, outgoing_rx) = mpsc::channel(OUTGOING_CAPACITY);

        let conn = Arc::new(Connection {
            outgoing: outgoing_tx,
            pending: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            broadcast: StreamBroadcast::new(),
            close: tokio::sync::OnceCell::new(),
            tasks: Mutex::new(Vec::new()),
        });

        let handler = Arc::new(handler);

        let writer_task = tokio::spawn(write_loop(writer, outgoing_rx));
        let reader_task = tokio::spawn(read_loop(conn.clone(), handler, reader));

        if let Ok(mut tasks) = conn.tasks.try_lock() {
            tasks.push(writer_task);
            tasks.push(reader_task);
        }

        conn
    }

    /// Sends a request and awaits its response, mapping a JSON-RPC error
    /// object to [`Error::Rpc`].
    pub async fn request<P: Serialize, T: for<'de> serde::Deserialize<'de>>(
        &self,
        method: &str,
        params: P,
    ) -> Result<T, Error> {
        let raw = self.request_raw(method, serde_json::to_value(params)?).await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Sends a request with already-serialized params and returns the raw
    /// result value. Used by callers (like extension method forwarding) that
    /// must not re-encode an already-JSON payload.
    pub async fn request_raw(&self, method: &str, params: Value) -> Result<Value, Error> {
        let id = RequestId::Integer(self.next_id.fetch_add(1, Ordering::SeqCst));
        let key = id.canonical_key();

        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().await;
            pending.insert(key.clone(), PendingRequest { reply: tx });
        }

        let params = normalize_params(params);
        let envelope = Envelope::request(id.clone(), method, params.clone());

        if self.outgoing.send(envelope).await.is_err() {
            self.pending.lock().await.remove(&key);
            return Err(Error::ChannelClosed);
        }
        self.broadcast.outgoing_request(id, method, params);

        match rx.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(Error::Rpc(err)),
            Err(_) => Err(Error::ChannelClosed),
        }
    }

    /// Sends a notification. There is no response to await.
    pub async fn notify<P: Serialize>(&self, method: &str, params: P) -> Result<(), Error> {
        let params = normalize_params(serde_json::to_value(params)?);
        self.notify_raw(method, params).await
    }

    /// Sends a notification with an already-serialized (or absent) params value.
    pub async fn notify_raw(&self, method: &str, params: Option<Value>) -> Result<(), Error> {
        let envelope = Envelope::notification(method, params.clone());
        self.outgoing
            .send(envelope)
            .await
            .map_err(|_| Error::ChannelClosed)?;
        self.broadcast.outgoing_notification(method, params);
        Ok(())
    }

    /// Subscribes to the raw incoming/outgoing envelope stream for this connection.
    pub fn subscribe(&self) -> StreamReceiver {
        self.broadcast.subscribe()
    }

    /// Closes the connection, releasing every still-pending call with
    /// [`Error::Closed`]. Idempotent: later calls are no-ops.
    pub async fn close(&self) {
        let _ = self
            .close
            .get_or_init(|| async {
                let mut pending = self.pending.lock().await;
                for (_, req) in pending.drain() {
                    let _ = req.reply.send(Err(RpcError::internal("connection closed")));
                }
                self.broadcast.close();
                let tasks = self.tasks.lock().await;
                for task in tasks.iter() {
                    task.abort();
                }
            })
            .await;
    }

    async fn resolve_pending(&self, id: &RequestId, outcome: Result<Value, RpcError>) {
        let key = id.canonical_key();
        let pending = { self.pending.lock().await.remove(&key) };
        if let Some(pending) = pending {
            let _ = pending.reply.send(outcome);
        }
    }
}

/// `serde_json::to_value(())` yields `Value::Null`; the wire omits `params`
/// entirely for zero-argument calls rather than sending a null params field.
fn normalize_params(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        other => Some(other),
    }
}

async fn write_loop<W>(writer: W, mut outgoing: mpsc::Receiver<Envelope>)
where
    W: AsyncWrite + Unpin,
{
    tokio::pin!(writer);
    while let Some(envelope) = outgoing.recv().await {
        let mut line = match serde_json::to_vec(&envelope) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(%err, "failed to serialize outgoing envelope, dropping");
                continue;
            }
        };
        line.push(b'\n');
        if writer.write_all(&line).await.is_err() {
            break;
        }
        if writer.flush().await.is_err() {
            break;
        }
    }
}

async fn read_loop<R>(conn: Arc<Connection>, handler: Arc<dyn InboundHandler>, reader: R)
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<Envelope>(&line) {
                    Ok(envelope) => dispatch_incoming(&conn, &handler, envelope),
                    Err(err) => warn!(%err, line = %line, "ignoring malformed line from peer"),
                }
            }
            Ok(None) => break,
            Err(err) => {
                warn!(%err, "connection read error");
                break;
            }
        }
    }
    conn.close().await;
}

fn dispatch_incoming(conn: &Arc<Connection>, handler: &Arc<dyn InboundHandler>, envelope: Envelope) {
    if envelope.is_request() {
        let id = envelope.id.clone().expect("checked by is_request");
        let method = envelope.method.clone().expect("checked by is_request");
        conn.broadcast
            .incoming_request(id.clone(), &method, envelope.params.clone());

        let conn = conn.clone();
        let handler = handler.clone();
        tokio::spawn(async move {
            let (result, error) = handler.handle_request(&method, envelope.params).await;
            let response = if error.is_none() {
                Envelope::response(id.clone(), result.unwrap_or(Value::Null))
            } else {
                Envelope::error_response(id.clone(), error.clone())
            };
            conn.broadcast.outgoing_response(
                id,
                response.result.clone(),
                response.error.clone(),
            );
            let _ = conn.outgoing.send(response).await;
        });
        return;
    }

    if envelope.is_response() {
        let id = envelope.id.clone().expect("checked by is_response");
        conn.broadcast
            .incoming_response(id.clone(), envelope.result.clone(), envelope.error.clone());
        let outcome = match envelope.error {
            Some(err) => Err(err),
            None => Ok(envelope.result.unwrap_or(Value::Null)),
        };
        let conn = conn.clone();
        tokio::spawn(async move {
            conn.resolve_pending(&id, outcome).await;
        });
        return;
    }

    if envelope.is_notification() {
        let method = envelope.method.clone().expect("checked by is_notification");
        conn.broadcast
            .incoming_notification(&method, envelope.params.clone());

        let handler = handler.clone();
        tokio::spawn(async move {
            let err = handler.handle_notification(&method, envelope.params).await;
            if !err.is_none() {
                debug!(method = %method, error = %err, "notification handler returned an error");
            }
        });
    }
}
