//! Routes inbound wire methods to a [`Client`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::Client;
use crate::connection::InboundHandler;
use crate::dispatch::decode_params;
use crate::error::RpcError;
use crate::ext::ExtRequest;
use crate::methods::{is_extension_method, strip_extension_prefix, CLIENT_METHODS};

pub(crate) struct ClientInboundHandler<C: Client> {
    client: Arc<C>,
}

impl<C: Client> ClientInboundHandler<C> {
    pub(crate) fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: Client> InboundHandler for ClientInboundHandler<C> {
    async fn handle_request(&self, method: &str, params: Option<Value>) -> (Option<Value>, RpcError) {
        macro_rules! call {
            ($decode_as:ty, $method:ident) => {{
                let request: $decode_as = match decode_params(params) {
                    Ok(request) => request,
                    Err(err) => return (None, err),
                };
                match self.client.$method(request).await {
                    Ok(response) => match serde_json::to_value(response) {
                        Ok(value) => (Some(value), RpcError::none()),
                        Err(err) => (None, RpcError::internal(err)),
                    },
                    Err(err) => (None, err),
                }
            }};
        }

        match method {
            m if m == CLIENT_METHODS.session_request_permission => {
                call!(crate::client_types::RequestPermissionRequest, request_permission)
            }
            m if m == CLIENT_METHODS.fs_write_text_file => {
                call!(crate::client_types::WriteTextFileRequest, write_text_file)
            }
            m if m == CLIENT_METHODS.fs_read_text_file => {
                call!(crate::client_types::ReadTextFileRequest, read_text_file)
            }
            m if m == CLIENT_METHODS.terminal_create => {
                call!(crate::client_types::CreateTerminalRequest, create_terminal)
            }
            m if m == CLIENT_METHODS.terminal_output => {
                call!(crate::client_types::TerminalOutputRequest, terminal_output)
            }
            m if m == CLIENT_METHODS.terminal_release => {
                call!(crate::client_types::ReleaseTerminalRequest, release_terminal)
            }
            m if m == CLIENT_METHODS.terminal_wait_for_exit => {
                call!(
                    crate::client_types::WaitForTerminalExitRequest,
                    wait_for_terminal_exit
                )
            }
            m if m == CLIENT_METHODS.terminal_kill => {
                call!(crate::client_types::KillTerminalCommandRequest, kill_terminal_command)
            }
            m if is_extension_method(m) => {
                let request = ExtRequest {
                    method: strip_extension_prefix(m).to_string(),
                    params: params.unwrap_or(Value::Null),
                };
                match self.client.ext_method(request).await {
                    Ok(response) => (Some(response.0), RpcError::none()),
                    Err(err) => (None, err),
                }
            }
            _ => (None, RpcError::method_not_found()),
        }
    }

    async fn handle_notification(&self, method: &str, params: Option<Value>) -> RpcError {
        if method == CLIENT_METHODS.session_update {
            let notification: crate::client_types::SessionNotification = match decode_params(params)
            {
                Ok(notification) => notification,
                Err(err) => return err,
            };
            return match self.client.session_notification(notification).await {
                Ok(()) => RpcError::none(),
                Err(err) => err,
            };
        }

        if is_extension_method(method) {
            let notification = crate::ext::ExtNotification {
                method: strip_extension_prefix(method).to_string(),
                params: params.unwrap_or(Value::Null),
            };
            return match self.client.ext_notification(notification).await {
                Ok(()) => RpcError::none(),
                Err(err) => err,
            };
        }

        RpcError::method_not_found()
    }
}
