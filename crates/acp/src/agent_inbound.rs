//! Routes inbound wire methods to an [`Agent`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::agent::Agent;
use crate::connection::InboundHandler;
use crate::dispatch::decode_params;
use crate::error::RpcError;
use crate::ext::ExtRequest;
use crate::methods::{is_extension_method, strip_extension_prefix, AGENT_METHODS};

pub(crate) struct AgentInboundHandler<A: Agent> {
    agent: Arc<A>,
}

impl<A: Agent> AgentInboundHandler<A> {
    pub(crate) fn new(agent: Arc<A>) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl<A: Agent> InboundHandler for AgentInboundHandler<A> {
    async fn handle_request(&self, method: &str, params: Option<Value>) -> (Option<Value>, RpcError) {
        macro_rules! call {
            ($decode_as:ty, $method:ident) => {{
                let request: $decode_as = match decode_params(params) {
                    Ok(request) => request,
                    Err(err) => return (None, err),
                };
                match self.agent.$method(request).await {
                    Ok(response) => match serde_json::to_value(response) {
                        Ok(value) => (Some(value), RpcError::none()),
                        Err(err) => (None, RpcError::internal(err)),
                    },
                    Err(err) => (None, err),
                }
            }};
        }

        match method {
            m if m == AGENT_METHODS.initialize => call!(crate::agent_types::InitializeRequest, initialize),
            m if m == AGENT_METHODS.authenticate => {
                call!(crate::agent_types::AuthenticateRequest, authenticate)
            }
            m if m == AGENT_METHODS.session_new => {
                let mut request: crate::agent_types::NewSessionRequest = match decode_params(params) {
                    Ok(request) => request,
                    Err(err) => return (None, err),
                };
                request.ensure_cwd();
                match self.agent.new_session(request).await {
                    Ok(response) => match serde_json::to_value(response) {
                        Ok(value) => (Some(value), RpcError::none()),
                        Err(err) => (None, RpcError::internal(err)),
                    },
                    Err(err) => (None, err),
                }
            }
            m if m == AGENT_METHODS.session_load => {
                call!(crate::agent_types::LoadSessionRequest, load_session)
            }
            m if m == AGENT_METHODS.session_set_mode => {
                call!(crate::agent_types::SetSessionModeRequest, set_session_mode)
            }
            m if m == AGENT_METHODS.session_set_model => {
                call!(crate::agent_types::SetSessionModelRequest, set_session_model)
            }
            m if m == AGENT_METHODS.session_prompt => {
                call!(crate::agent_types::PromptRequest, prompt)
            }
            m if is_extension_method(m) => {
                let request = ExtRequest {
                    method: strip_extension_prefix(m).to_string(),
                    params: params.unwrap_or(Value::Null),
                };
                match self.agent.ext_method(request).await {
                    Ok(response) => (Some(response.0), RpcError::none()),
                    Err(err) => (None, err),
                }
            }
            _ => (None, RpcError::method_not_found()),
        }
    }

    async fn handle_notification(&self, method: &str, params: Option<Value>) -> RpcError {
        if method == AGENT_METHODS.session_cancel {
            let notification: crate::agent_types::CancelNotification = match decode_params(params)
            {
                Ok(notification) => notification,
                Err(err) => return err,
            };
            return match self.agent.cancel(notification).await {
                Ok(()) => RpcError::none(),
                Err(err) => err,
            };
        }

        if is_extension_method(method) {
            let notification = crate::ext::ExtNotification {
                method: strip_extension_prefix(method).to_string(),
                params: params.unwrap_or(Value::Null),
            };
            return match self.agent.ext_notification(notification).await {
                Ok(()) => RpcError::none(),
                Err(err) => err,
            };
        }

        RpcError::method_not_found()
    }
}
