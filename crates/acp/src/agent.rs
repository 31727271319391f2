//! The [`Agent`] trait: implemented by whatever runs the agent-bound methods
//! (`initialize`, `authenticate`, `session/*`).

use async_trait::async_trait;
use serde_json::Value;

use crate::agent_types::{
    AuthenticateRequest, AuthenticateResponse, CancelNotification, InitializeRequest,
    InitializeResponse, LoadSessionRequest, LoadSessionResponse, NewSessionRequest,
    NewSessionResponse, PromptRequest, PromptResponse, SetSessionModeRequest,
    SetSessionModeResponse, SetSessionModelRequest, SetSessionModelResponse,
};
use crate::error::RpcError;
use crate::ext::{ExtNotification, ExtRequest, ExtResponse};

#[async_trait]
pub trait Agent: Send + Sync + 'static {
    async fn initialize(&self, request: InitializeRequest) -> Result<InitializeResponse, RpcError>;
    async fn authenticate(
        &self,
        request: AuthenticateRequest,
    ) -> Result<AuthenticateResponse, RpcError>;
    async fn new_session(&self, request: NewSessionRequest) -> Result<NewSessionResponse, RpcError>;
    async fn load_session(
        &self,
        request: LoadSessionRequest,
    ) -> Result<LoadSessionResponse, RpcError>;
    async fn set_session_mode(
        &self,
        request: SetSessionModeRequest,
    ) -> Result<SetSessionModeResponse, RpcError>;
    async fn set_session_model(
        &self,
        request: SetSessionModelRequest,
    ) -> Result<SetSessionModelResponse, RpcError>;
    async fn prompt(&self, request: PromptRequest) -> Result<PromptResponse, RpcError>;
    async fn cancel(&self, notification: CancelNotification) -> Result<(), RpcError>;
    async fn ext_method(&self, request: ExtRequest) -> Result<ExtResponse, RpcError>;
    async fn ext_notification(&self, notification: ExtNotification) -> Result<(), RpcError>;
}

/// Default [`Agent`] impl that answers `method not found` to every required
/// method and no-ops extension hooks. Embed it in a partial implementation and
/// override only the methods you support.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnimplementedAgent;

#[async_trait]
impl Agent for UnimplementedAgent {
    async fn initialize(&self, _request: InitializeRequest) -> Result<InitializeResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn authenticate(
        &self,
        _request: AuthenticateRequest,
    ) -> Result<AuthenticateResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn new_session(
        &self,
        _request: NewSessionRequest,
    ) -> Result<NewSessionResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn load_session(
        &self,
        _request: LoadSessionRequest,
    ) -> Result<LoadSessionResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn set_session_mode(
        &self,
        _request: SetSessionModeRequest,
    ) -> Result<SetSessionModeResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn set_session_model(
        &self,
        _request: SetSessionModelRequest,
    ) -> Result<SetSessionModelResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn prompt(&self, _request: PromptRequest) -> Result<PromptResponse, RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn cancel(&self, _notification: CancelNotification) -> Result<(), RpcError> {
        Err(RpcError::method_not_found())
    }

    async fn ext_method(&self, _request: ExtRequest) -> Result<ExtResponse, RpcError> {
        Ok(ExtResponse(Value::Null))
    }

    async fn ext_notification(&self, _notification: ExtNotification) -> Result<(), RpcError> {
        Ok(())
    }
}
