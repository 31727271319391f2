//! Wires two in-memory connections together end to end, the way
//! `original_source/connection_test.go` exercises the Go implementation: an
//! `AgentSideConnection` and a `ClientSideConnection` joined by a pair of
//! `tokio::io::duplex` pipes, each backed by a hand-written `Agent`/`Client`.

use std::sync::{Arc, Mutex};

use acp::agent_types::{
    AuthMethod, AuthenticateRequest, AuthenticateResponse, CancelNotification, ClientCapabilities,
    InitializeRequest, InitializeResponse, LoadSessionRequest, LoadSessionResponse,
    NewSessionRequest, NewSessionResponse, PromptRequest, PromptResponse, SetSessionModeRequest,
    SetSessionModeResponse, SetSessionModelRequest, SetSessionModelResponse, StopReason,
};
use acp::client_types::{
    CreateTerminalRequest, CreateTerminalResponse, KillTerminalCommandRequest,
    KillTerminalCommandResponse, PermissionOption, PermissionOptionKind, ReadTextFileRequest,
    ReadTextFileResponse, ReleaseTerminalRequest, ReleaseTerminalResponse,
    RequestPermissionOutcome, RequestPermissionRequest, RequestPermissionResponse,
    SessionNotification, SessionUpdate, SessionUpdateType, TerminalOutputRequest,
    TerminalOutputResponse, WaitForTerminalExitRequest, WaitForTerminalExitResponse,
    WriteTextFileRequest, WriteTextFileResponse,
};
use acp::content::ContentBlock;
use acp::ext::{ExtNotification, ExtRequest, ExtResponse};
use acp::identifiers::{PermissionOptionId, SessionId};
use acp::stream::StreamMessageDirection;
use acp::version::ProtocolVersion;
use acp::{Agent, AgentSideConnection, Client, ClientSideConnection, RpcError};
use serde_json::Value;

#[derive(Default, Clone)]
struct RecordingAgent {
    observed_cwd: Arc<Mutex<Option<String>>>,
    cancelled_session: Arc<Mutex<Option<SessionId>>>,
}

#[async_trait::async_trait]
impl Agent for RecordingAgent {
    async fn initialize(&self, _request: InitializeRequest) -> Result<InitializeResponse, RpcError> {
        Ok(InitializeResponse {
            protocol_version: ProtocolVersion::CURRENT,
            agent_capabilities: Default::default(),
            auth_methods: vec![AuthMethod {
                id: "oauth".into(),
                name: "OAuth".to_string(),
                description: None,
                meta: None,
            }],
            agent_info: None,
            meta: None,
        })
    }

    async fn authenticate(
        &self,
        _request: AuthenticateRequest,
    ) -> Result<AuthenticateResponse, RpcError> {
        Ok(AuthenticateResponse::default())
    }

    async fn new_session(&self, request: NewSessionRequest) -> Result<NewSessionResponse, RpcError> {
        *self.observed_cwd.lock().unwrap() = Some(request.cwd);
        Ok(NewSessionResponse {
            session_id: "sess-1".into(),
            modes: None,
            models: None,
            meta: None,
        })
    }

    async fn load_session(
        &self,
        _request: LoadSessionRequest,
    ) -> Result<LoadSessionResponse, RpcError> {
        Ok(LoadSessionResponse::default())
    }

    async fn set_session_mode(
        &self,
        _request: SetSessionModeRequest,
    ) -> Result<SetSessionModeResponse, RpcError> {
        Ok(SetSessionModeResponse::default())
    }

    async fn set_session_model(
        &self,
        _request: SetSessionModelRequest,
    ) -> Result<SetSessionModelResponse, RpcError> {
        Ok(SetSessionModelResponse::default())
    }

    async fn prompt(&self, _request: PromptRequest) -> Result<PromptResponse, RpcError> {
        Ok(PromptResponse {
            stop_reason: StopReason::EndTurn,
            meta: None,
        })
    }

    async fn cancel(&self, notification: CancelNotification) -> Result<(), RpcError> {
        *self.cancelled_session.lock().unwrap() = Some(notification.session_id);
        Ok(())
    }

    async fn ext_method(&self, request: ExtRequest) -> Result<ExtResponse, RpcError> {
        Ok(ExtResponse(serde_json::json!({"echo": request.params})))
    }

    async fn ext_notification(&self, _notification: ExtNotification) -> Result<(), RpcError> {
        Ok(())
    }
}

#[derive(Default, Clone)]
struct RecordingClient {
    notifications: Arc<Mutex<Vec<SessionNotification>>>,
    ext_notifications: Arc<Mutex<Vec<ExtNotification>>>,
}

#[async_trait::async_trait]
impl Client for RecordingClient {
    async fn request_permission(
        &self,
        request: RequestPermissionRequest,
    ) -> Result<RequestPermissionResponse, RpcError> {
        let chosen = request.options.first().expect("at least one option").id.clone();
        Ok(RequestPermissionResponse {
            outcome: RequestPermissionOutcome::Selected { option_id: chosen },
            meta: None,
        })
    }

    async fn session_notification(&self, notification: SessionNotification) -> Result<(), RpcError> {
        self.notifications.lock().unwrap().push(notification);
        Ok(())
    }

    async fn write_text_file(
        &self,
        _request: WriteTextFileRequest,
    ) -> Result<WriteTextFileResponse, RpcError> {
        Ok(WriteTextFileResponse::default())
    }

    async fn read_text_file(
        &self,
        _request: ReadTextFileRequest,
    ) -> Result<ReadTextFileResponse, RpcError> {
        Ok(ReadTextFileResponse {
            content: String::new(),
            meta: None,
        })
    }

    async fn create_terminal(
        &self,
        _request: CreateTerminalRequest,
    ) -> Result<CreateTerminalResponse, RpcError> {
        Ok(CreateTerminalResponse {
            terminal_id: "term-1".into(),
            meta: None,
        })
    }

    async fn terminal_output(
        &self,
        _request: TerminalOutputRequest,
    ) -> Result<TerminalOutputResponse, RpcError> {
        Ok(TerminalOutputResponse {
            output: String::new(),
            truncated: false,
            exit_status: None,
            meta: None,
        })
    }

    async fn release_terminal(
        &self,
        _request: ReleaseTerminalRequest,
    ) -> Result<ReleaseTerminalResponse, RpcError> {
        Ok(ReleaseTerminalResponse::default())
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
        Ok(KillTerminalCommandResponse::default())
    }

    async fn ext_method(&self, _request: ExtRequest) -> Result<ExtResponse, RpcError> {
        Ok(ExtResponse(Value::Null))
    }

    async fn ext_notification(&self, notification: ExtNotification) -> Result<(), RpcError> {
        self.ext_notifications.lock().unwrap().push(notification);
        Ok(())
    }
}

struct Harness {
    agent_side: AgentSideConnection,
    client_side: ClientSideConnection,
}

fn build_harness(agent: RecordingAgent, client: RecordingClient) -> Harness {
    let (agent_io, client_io) = tokio::io::duplex(16 * 1024);
    let (agent_read, agent_write) = tokio::io::split(agent_io);
    let (client_read, client_write) = tokio::io::split(client_io);

    let agent_side = AgentSideConnection::new(agent, agent_read, agent_write);
    let client_side = ClientSideConnection::new(client, client_read, client_write);

    Harness {
        agent_side,
        client_side,
    }
}

#[tokio::test]
async fn initialize_round_trips_capabilities() {
    let harness = build_harness(RecordingAgent::default(), RecordingClient::default());

    let response = harness
        .client_side
        .initialize(InitializeRequest {
            protocol_version: ProtocolVersion::CURRENT,
            client_capabilities: ClientCapabilities::default(),
            client_info: None,
            meta: None,
        })
        .await
        .unwrap();

    assert_eq!(response.protocol_version, ProtocolVersion::CURRENT);
    assert_eq!(response.auth_methods.len(), 1);
    assert_eq!(response.auth_methods[0].name, "OAuth");
}

#[tokio::test]
async fn new_session_normalizes_cwd_before_reaching_the_agent() {
    let agent = RecordingAgent::default();
    let observed_cwd = agent.observed_cwd.clone();
    let harness = build_harness(agent, RecordingClient::default());

    let response = harness
        .client_side
        .new_session(NewSessionRequest {
            cwd: "/tmp/../tmp/./work".to_string(),
            mcp_servers: Vec::new(),
            meta: None,
        })
        .await
        .unwrap();

    assert_eq!(response.session_id, SessionId::from("sess-1"));
    assert_eq!(observed_cwd.lock().unwrap().as_deref(), Some("/tmp/work"));
}

#[tokio::test]
async fn permission_request_round_trips_the_selected_option() {
    let harness = build_harness(RecordingAgent::default(), RecordingClient::default());

    let response = harness
        .agent_side
        .request_permission(RequestPermissionRequest {
            session_id: "sess-1".into(),
            tool_call: acp::client_types::ToolCallUpdate {
                id: "call-1".to_string(),
                status: "pending".to_string(),
                output: None,
                meta: None,
            },
            options: vec![PermissionOption {
                id: PermissionOptionId::from("allow"),
                name: "Allow".to_string(),
                kind: PermissionOptionKind::AllowOnce,
                meta: None,
            }],
            meta: None,
        })
        .await
        .unwrap();

    match response.outcome {
        RequestPermissionOutcome::Selected { option_id } => {
            assert_eq!(option_id, PermissionOptionId::from("allow"));
        }
        RequestPermissionOutcome::Cancelled => panic!("expected a selected outcome"),
    }
}

#[tokio::test]
async fn session_update_notification_reaches_the_client() {
    let client = RecordingClient::default();
    let notifications = client.notifications.clone();
    let harness = build_harness(RecordingAgent::default(), client);

    harness
        .agent_side
        .session_notification(SessionNotification {
            session_id: "sess-1".into(),
            update: SessionUpdate {
                kind: SessionUpdateType::AgentMessageChunk,
                content: Some(ContentBlock::new_text("hi")),
                tool_call: None,
                tool_call_update: None,
                plan: None,
                available_commands: Vec::new(),
                current_mode_id: None,
                meta: None,
            },
            meta: None,
        })
        .await
        .unwrap();

    // Notifications are fire-and-forget; give the dispatched task a moment to run.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let recorded = notifications.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].session_id, SessionId::from("sess-1"));
    assert_eq!(recorded[0].update.kind, SessionUpdateType::AgentMessageChunk);
    drop(recorded);

    harness.agent_side.close().await;
    harness.client_side.close().await;
}

#[tokio::test]
async fn cancel_notification_reaches_the_agent() {
    let agent = RecordingAgent::default();
    let cancelled_session = agent.cancelled_session.clone();
    let harness = build_harness(agent, RecordingClient::default());

    harness
        .client_side
        .cancel(CancelNotification {
            session_id: "sess-1".into(),
            meta: None,
        })
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(
        cancelled_session.lock().unwrap().as_ref(),
        Some(&SessionId::from("sess-1"))
    );
}

#[tokio::test]
async fn ext_method_sends_raw_params_and_returns_the_raw_result() {
    let harness = build_harness(RecordingAgent::default(), RecordingClient::default());

    let response = harness
        .client_side
        .ext_method("custom/ping", serde_json::json!({"n": 1}))
        .await
        .unwrap();

    assert_eq!(response.0, serde_json::json!({"echo": {"n": 1}}));
}

#[tokio::test]
async fn unbound_method_on_an_unimplemented_agent_is_method_not_found() {
    let (agent_io, client_io) = tokio::io::duplex(16 * 1024);
    let (agent_read, agent_write) = tokio::io::split(agent_io);
    let (client_read, client_write) = tokio::io::split(client_io);

    let _agent_side =
        AgentSideConnection::new(acp::UnimplementedAgent, agent_read, agent_write);
    let client_side = ClientSideConnection::new(RecordingClient::default(), client_read, client_write);

    let err = client_side
        .load_session(LoadSessionRequest {
            mcp_servers: Vec::new(),
            cwd: "/tmp".to_string(),
            session_id: "missing".into(),
            meta: None,
        })
        .await
        .unwrap_err();

    match err {
        acp::Error::Rpc(rpc) => assert_eq!(rpc.code, acp::error::CODE_METHOD_NOT_FOUND),
        other => panic!("expected Error::Rpc, got {other:?}"),
    }
}

#[tokio::test]
async fn subscribe_observes_the_full_request_response_cycle() {
    let harness = build_harness(RecordingAgent::default(), RecordingClient::default());
    let mut agent_events = harness.agent_side.subscribe();

    let _: InitializeResponse = harness
        .client_side
        .initialize(InitializeRequest {
            protocol_version: ProtocolVersion::CURRENT,
            client_capabilities: ClientCapabilities::default(),
            client_info: None,
            meta: None,
        })
        .await
        .unwrap();

    let incoming_request = tokio::time::timeout(
        std::time::Duration::from_millis(200),
        agent_events.recv(),
    )
    .await
    .expect("timed out")
    .expect("stream ended early");
    assert_eq!(incoming_request.direction, StreamMessageDirection::Incoming);

    let outgoing_response = tokio::time::timeout(
        std::time::Duration::from_millis(200),
        agent_events.recv(),
    )
    .await
    .expect("timed out")
    .expect("stream ended early");
    assert_eq!(outgoing_response.direction, StreamMessageDirection::Outgoing);
}
