//! A best-effort observer bus for the raw envelopes flowing across a connection.
//!
//! Subscribers get a bounded queue (capacity 32) fed non-blocking: a full queue
//! drops the message rather than stalling the connection's read or write loop.
//! This is for diagnostics/tooling, not a reliable delivery channel.

use std::sync::Mutex;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::RpcError;
use crate::identifiers::RequestId;

const SUBSCRIBER_CAPACITY: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamMessageDirection {
    Incoming,
    Outgoing,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StreamMessageContent {
    Request {
        id: RequestId,
        method: String,
        params: Option<Value>,
    },
    Response {
        id: RequestId,
        result: Option<Value>,
        error: Option<RpcError>,
    },
    Notification {
        method: String,
        params: Option<Value>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct StreamMessage {
    pub direction: StreamMessageDirection,
    pub content: StreamMessageContent,
}

/// The receiving half returned by [`crate::connection::Connection::subscribe`].
pub struct StreamReceiver {
    rx: mpsc::Receiver<StreamMessage>,
}

impl StreamReceiver {
    /// Waits for the next message. Returns `None` once the connection closes
    /// and no more messages will ever arrive.
    pub async fn recv(&mut self) -> Option<StreamMessage> {
        self.rx.recv().await
    }
}

#[derive(Default)]
pub struct StreamBroadcast {
    subscribers: Mutex<Vec<mpsc::Sender<StreamMessage>>>,
}

impl StreamBroadcast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> StreamReceiver {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_CAPACITY);
        self.subscribers.lock().expect("stream subscribers lock poisoned").push(tx);
        StreamReceiver { rx }
    }

    /// Drops every subscriber's sender, closing their channels so a pending or
    /// future `StreamReceiver::recv` returns `None` instead of waiting on a
    /// connection that will never send again.
    pub fn close(&self) {
        self.subscribers.lock().expect("stream subscribers lock poisoned").clear();
    }

    fn send(&self, message: StreamMessage) {
        let mut subscribers = self.subscribers.lock().expect("stream subscribers lock poisoned");
        subscribers.retain(|tx| match tx.try_send(message.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => true,
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
    }

    pub fn outgoing_request(&self, id: RequestId, method: &str, params: Option<Value>) {
        self.send(StreamMessage {
            direction: StreamMessageDirection::Outgoing,
            content: StreamMessageContent::Request {
                id,
                method: method.to_string(),
                params,
            },
        });
    }

    pub fn outgoing_response(&self, id: RequestId, result: Option<Value>, error: Option<RpcError>) {
        self.send(StreamMessage {
            direction: StreamMessageDirection::Outgoing,
            content: StreamMessageContent::Response { id, result, error },
        });
    }

    pub fn outgoing_notification(&self, method: &str, params: Option<Value>) {
        self.send(StreamMessage {
            direction: StreamMessageDirection::Outgoing,
            content: StreamMessageContent::Notification {
                method: method.to_string(),
                params,
            },
        });
    }

    pub fn incoming_request(&self, id: RequestId, method: &str, params: Option<Value>) {
        self.send(StreamMessage {
            direction: StreamMessageDirection::Incoming,
            content: StreamMessageContent::Request {
                id,
                method: method.to_string(),
                params,
            },
        });
    }

    pub fn incoming_response(&self, id: RequestId, result: Option<Value>, error: Option<RpcError>) {
        self.send(StreamMessage {
            direction: StreamMessageDirection::Incoming,
            content: StreamMessageContent::Response { id, result, error },
        });
    }

    pub fn incoming_notification(&self, method: &str, params: Option<Value>) {
        self.send(StreamMessage {
            direction: StreamMessageDirection::Incoming,
            content: StreamMessageContent::Notification {
                method: method.to_string(),
                params,
            },
        });
    }
}
