//! [`AgentSideConnection`]: the façade an agent process holds to talk to its client peer.
//!
//! Binds an [`Agent`] implementation to inbound dispatch and exposes the
//! client-bound methods (`session/request_permission`, `fs/*`, `terminal/*`,
//! `session/update`) as typed outbound calls.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::agent::Agent;
use crate::agent_inbound::AgentInboundHandler;
use crate::client_types::{
    CreateTerminalRequest, CreateTerminalResponse, KillTerminalCommandRequest,
    KillTerminalCommandResponse, ReadTextFileRequest, ReadTextFileResponse,
    ReleaseTerminalRequest, ReleaseTerminalResponse, RequestPermissionRequest,
    RequestPermissionResponse, SessionNotification, TerminalOutputRequest,
    TerminalOutputResponse, WaitForTerminalExitRequest, WaitForTerminalExitResponse,
    WriteTextFileRequest, WriteTextFileResponse,
};
use crate::connection::Connection;
use crate::error::Error;
use crate::ext::ExtResponse;
use crate::methods::CLIENT_METHODS;
use crate::stream::StreamReceiver;

pub struct AgentSideConnection {
    rpc: Arc<Connection>,
}

impl AgentSideConnection {
    /// Adopts `writer`/`reader` as the newline-framed transport and starts
    /// dispatching inbound agent-bound methods to `agent`.
    pub fn new<A, R, W>(agent: A, reader: R, writer: W) -> Self
    where
        A: Agent,
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let handler = AgentInboundHandler::new(Arc::new(agent));
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

    pub async fn request_permission(
        &self,
        request: RequestPermissionRequest,
    ) -> Result<RequestPermissionResponse, Error> {
        self.rpc
            .request(CLIENT_METHODS.session_request_permission, request)
            .await
    }

    pub async fn write_text_file(
        &self,
        request: WriteTextFileRequest,
    ) -> Result<WriteTextFileResponse, Error> {
        self.rpc.request(CLIENT_METHODS.fs_write_text_file, request).await
    }

    pub async fn read_text_file(
        &self,
        request: ReadTextFileRequest,
    ) -> Result<ReadTextFileResponse, Error> {
        self.rpc.request(CLIENT_METHODS.fs_read_text_file, request).await
    }

    pub async fn create_terminal(
        &self,
        request: CreateTerminalRequest,
    ) -> Result<CreateTerminalResponse, Error> {
        self.rpc.request(CLIENT_METHODS.terminal_create, request).await
    }

    pub async fn terminal_output(
        &self,
        request: TerminalOutputRequest,
    ) -> Result<TerminalOutputResponse, Error> {
        self.rpc.request(CLIENT_METHODS.terminal_output, request).await
    }

    pub async fn release_terminal(
        &self,
        request: ReleaseTerminalRequest,
    ) -> Result<ReleaseTerminalResponse, Error> {
        self.rpc.request(CLIENT_METHODS.terminal_release, request).await
    }

    pub async fn wait_for_terminal_exit(
        &self,
        request: WaitForTerminalExitRequest,
    ) -> Result<WaitForTerminalExitResponse, Error> {
        self.rpc
            .request(CLIENT_METHODS.terminal_wait_for_exit, request)
            .await
    }

    pub async fn kill_terminal_command(
        &self,
        request: KillTerminalCommandRequest,
    ) -> Result<KillTerminalCommandResponse, Error> {
        self.rpc.request(CLIENT_METHODS.terminal_kill, request).await
    }

    pub async fn session_notification(&self, notification: SessionNotification) -> Result<(), Error> {
        self.rpc.notify(CLIENT_METHODS.session_update, notification).await
    }

    /// Calls an extension method under wire name `"_" + method`. `params` is
    /// sent as-is; it is not re-wrapped, unlike the inbound extension hook's
    /// in-process `ExtRequest` convenience (see [`crate::ext`]).
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
