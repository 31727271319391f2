//! The [`Client`] trait: implemented by whatever runs the client-bound
//! methods (`session/request_permission`, `session/update`, `fs/*`, `terminal/*`).

use async_trait::async_trait;
use serde_json::Value;

use crate::client_types::{
    CreateTerminalRequest, CreateTerminalResponse, KillTerminalCommandRequest,
    KillTerminalCommandResponse, ReadTextFileRequest, ReadTextFileResponse,
    ReleaseTerminalRequest, ReleaseTerminalResponse, RequestPermissionRequest,
    RequestPermissionResponse, SessionNotification, TerminalOutputRequest,
    TerminalOutputResponse, WaitForTerminalExitRequest, WaitForTerminalExitResponse,
    WriteTextFileRequest, WriteTextFileResponse,
};
use crate::error::RpcError;
use crate::ext::{ExtNotification, ExtRequest, ExtResponse};

#[async_trait]
pub trait Client: Send + Sync + 'static {
    async fn request_permission(
        &self,
        request: RequestPermissionRequest,
    ) -> Result<RequestPermissionResponse, RpcError>;
    async fn session_notification(&self, notification: SessionNotification)
        -> Result<(), RpcError>;
    async fn write_text_file(
        &self,
        request: WriteTextFileRequest,
    ) -> Result<WriteTextFileResponse, RpcError>;
    async fn read_text_file(
        &self,
        request: ReadTextFileRequest,
    ) -> Result<ReadTextFileResponse, RpcError>;
    async fn create_terminal(
        &self,
        request: CreateTerminalRequest,
    ) -> Result<CreateTerminalResponse, RpcError>;
    async fn terminal_output(
        &self,
        request: TerminalOutputRequest,
    ) -> Result<TerminalOutputResponse, RpcError>;
    async fn release_terminal(
        &self,
        request: ReleaseTerminalRequest,
    ) -> Result<ReleaseTerminalResponse, RpcError>;
    async fn wait_for_terminal_exit(
        &self,
        request: WaitForTerminalExitRequest,
    ) -> Result<WaitForTerminalExitResponse, RpcError>;
    async fn kill_terminal_command(
        &self,
        request: KillTerminalCommandRequest,
    ) -> Result<KillTerminalCommandResponse, RpcError>;
    async fn ext_method(&self, request: ExtRequest) -> Result<ExtResponse, RpcError>;
    async fn ext_notification(&self, notification: ExtNotification) -> Result<(), RpcError>;
}

/// Default [`Client`] impl that answers `method not found` to every required
/// method and no-ops extension/notification hooks.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnimplementedClient;

#[async_trait]
impl Client for UnimplementedClient {
    async fn request_permission(
        &self,
        _request: RequestPermissionRequest,
    ) -> Result<RequestPermissionResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn session_notification(
        &self,
        _notification: SessionNotification,
    ) -> Result<(), RpcError> {
        Ok(())
    }

    async fn write_text_file(
        &self,
        _request: WriteTextFileRequest,
    ) -> Result<WriteTextFileResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn read_text_file(
        &self,
        _request: ReadTextFileRequest,
    ) -> Result<ReadTextFileResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn create_terminal(
        &self,
        _request: CreateTerminalRequest,
    ) -> Result<CreateTerminalResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn terminal_output(
        &self,
        _request: TerminalOutputRequest,
    ) -> Result<TerminalOutputResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn release_terminal(
        &self,
        _request: ReleaseTerminalRequest,
    ) -> Result<ReleaseTerminalResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn wait_for_terminal_exit(
        &self,
        _request: WaitForTerminalExitRequest,
    ) -> Result<WaitForTerminalExitResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn kill_terminal_command(
        &self,
        _request: KillTerminalCommandRequest,
    ) -> Result<KillTerminalCommandResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn ext_method(&self, _request: ExtRequest) -> Result<ExtResponse, RpcError> {
        Ok(ExtResponse(Value::Null))
    }

    async fn ext_notification(&self, _notification: ExtNotification) -> Result<(), RpcError> {
        Ok(())
    }
}
