//! [`ClientSideConnection`]: the façade a client process holds to talk to its agent peer.
//!
//! Binds a [`Client`] implementation to inbound dispatch and exposes the
//! agent-bound methods (`initialize`, `authenticate`, `session/*`) as typed
//! outbound calls.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::agent_types::{
    AuthenticateRequest, AuthenticateResponse, CancelNotification, InitializeRequest,
    InitializeResponse, LoadSessionRequest, LoadSessionResponse, NewSessionRequest,
    NewSessionResponse, PromptRequest, PromptResponse, SetSessionModeRequest,
    SetSessionModeResponse, SetSessionModelRequest, SetSessionModelResponse,
};
use crate::client::Client;
use crate::client_inbound::ClientInboundHandler;
use crate::connection::Connection;
use crate::error::Error;
use crate::ext::ExtResponse;
use crate::methods::AGENT_METHODS;
use crate::stream::StreamReceiver;

pub struct ClientSideConnection {
    rpc: Arc<Connection>,
}

impl ClientSideConnection {
    /// Adopts `writer`/`reader` as the newline-framed transport and starts
    /// dispatching inbound client-bound methods to `client`.
    pub fn new<C, R, W>(client: C, reader: R, writer: W) -> Self
    where
        C: Client,
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let handler = ClientInboundHandler::new(Arc::new(client));
        Self {
            rpc: Connection::spawn(handler, reader, writer),
        }
    }

    pub async fn close(&self) {
        self.rpc.close().await;
    }

    pub fn subscribe(&self) -> StreamReceiver {
        self.rpc.subscribe()
    }

    pub async fn initialize(&self, request: InitializeRequest) -> Result<InitializeResponse, Error> {
        self.rpc.request(AGENT_METHODS.initialize, request).await
    }

    pub async fn authenticate(
        &self,
        request: AuthenticateRequest,
    ) -> Result<AuthenticateResponse, Error> {
        self.rpc.request(AGENT_METHODS.authenticate, request).await
    }

    pub async fn new_session(&self, request: NewSessionRequest) -> Result<NewSessionResponse, Error> {
        self.rpc.request(AGENT_METHODS.session_new, request).await
    }

    pub async fn load_session(
        &self,
        request: LoadSessionRequest,
    ) -> Result<LoadSessionResponse, Error> {
        self.rpc.request(AGENT_METHODS.session_load, request).await
    }

    pub async fn set_session_mode(
        &self,
        request: SetSessionModeRequest,
    ) -> Result<SetSessionModeResponse, Error> {
        self.rpc.request(AGENT_METHODS.session_set_mode, request).await
    }

    pub async fn set_session_model(
        &self,
        request: SetSessionModelRequest,
    ) -> Result<SetSessionModelResponse, Error> {
        self.rpc.request(AGENT_METHODS.session_set_model, request).await
    }

    pub async fn prompt(&self, request: PromptRequest) -> Result<PromptResponse, Error> {
        self.rpc.request(AGENT_METHODS.session_prompt, request).await
    }

    pub async fn cancel(&self, notification: CancelNotification) -> Result<(), Error> {
        self.rpc.notify(AGENT_METHODS.session_cancel, notification).await
    }

    /// Calls an extension method under wire name `"_" + method`. `params` is
    /// sent as-is; see [`crate::ext`] for why this differs from the inbound hook.
    pub async fn ext_method(&self, method: &str, params: Value) -> Result<ExtResponse, Error> {
        let wire_method = format!("_{method}");
        let result = self.rpc.request_raw(&wire_method, params).await?;
        Ok(ExtResponse(result))
    }

    /// Sends an extension notification under wire name `"_" + method`, with `params` raw.
    pub async fn ext_notification(&self, method: &str, params: Value) -> Result<(), Error> {
        let wire_method = format!("_{method}");
        self.rpc.notify_raw(&wire_method, Some(params)).await
    }
}
