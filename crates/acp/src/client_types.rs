//! Typed payloads for methods the agent sends and the client handles:
//! `session/update`, `session/request_permission`, `fs/*`, `terminal/*`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::ContentBlock;
use crate::identifiers::{PermissionOptionId, SessionId, SessionModeId, TerminalId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionNotification {
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    pub update: SessionUpdate,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionUpdateType {
    AgentMessageChunk,
    UserMessageChunk,
    AgentThoughtChunk,
    ToolCall,
    ToolCallUpdate,
    Plan,
    AvailableCommandsUpdate,
    CurrentModeUpdate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdate {
    #[serde(rename = "sessionUpdate")]
    pub kind: SessionUpdateType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "toolCall")]
    pub tool_call: Option<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "toolCallUpdate")]
    pub tool_call_update: Option<ToolCallUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "availableCommands")]
    pub available_commands: Vec<AvailableCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "currentModeId")]
    pub current_mode_id: Option<SessionModeId>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub entries: Vec<PlanEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub content: String,
    pub priority: PlanEntryPriority,
    pub status: PlanEntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanEntryPriority {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanEntryStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCallUpdate {
    pub id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvailableCommand {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "inputHint")]
    pub input_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestPermissionRequest {
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    #[serde(rename = "toolCall")]
    pub tool_call: ToolCallUpdate,
    pub options: Vec<PermissionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PermissionOption {
    #[serde(rename = "optionId")]
    pub id: PermissionOptionId,
    pub name: String,
    pub kind: PermissionOptionKind,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionOptionKind {
    AllowOnce,
    AllowAlways,
    RejectOnce,
    RejectAlways,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RequestPermissionOutcome {
    Cancelled,
    Selected {
        #[serde(rename = "optionId")]
        option_id: PermissionOptionId,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestPermissionResponse {
    pub outcome: RequestPermissionOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WriteTextFileRequest {
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    pub path: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteTextFileResponse {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadTextFileRequest {
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadTextFileResponse {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateTerminalRequest {
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<crate::agent_types::EnvVariable>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "cwd")]
    pub cwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateTerminalResponse {
    #[serde(rename = "terminalId")]
    pub terminal_id: TerminalId,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerminalOutputRequest {
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    #[serde(rename = "terminalId")]
    pub terminal_id: TerminalId,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TerminalExitStatus {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "exitCode")]
    pub exit_code: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerminalOutputResponse {
    pub output: String,
    pub truncated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "exitStatus")]
    pub exit_status: Option<TerminalExitStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReleaseTerminalRequest {
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    #[serde(rename = "terminalId")]
    pub terminal_id: TerminalId,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseTerminalResponse {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KillTerminalCommandRequest {
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    #[serde(rename = "terminalId")]
    pub terminal_id: TerminalId,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KillTerminalCommandResponse {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaitForTerminalExitRequest {
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    #[serde(rename = "terminalId")]
    pub terminal_id: TerminalId,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaitForTerminalExitResponse {
    #[serde(rename = "exitStatus")]
    pub exit_status: TerminalExitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_outcome_matches_go_wire_shape() {
        let outcome = RequestPermissionOutcome::Selected {
            option_id: PermissionOptionId::from("allow"),
        };
        let encoded = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({"outcome": "selected", "optionId": "allow"})
        );
    }

    #[test]
    fn cancelled_outcome_has_no_option_id_field() {
        let outcome = RequestPermissionOutcome::Cancelled;
        let encoded = serde_json::to_value(&outcome).unwrap();
        assert_eq!(encoded, serde_json::json!({"outcome": "cancelled"}));
    }

    #[test]
    fn request_permission_response_round_trips() {
        let response = RequestPermissionResponse {
            outcome: RequestPermissionOutcome::Selected {
                option_id: PermissionOptionId::from("allow-once"),
            },
            meta: None,
        };
        let encoded = serde_json::to_string(&response).unwrap();
        let decoded: RequestPermissionResponse = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn session_update_tags_on_session_update_field() {
        let update = SessionUpdate {
            kind: SessionUpdateType::AgentMessageChunk,
            content: Some(crate::content::ContentBlock::new_text("hi")),
            tool_call: None,
            tool_call_update: None,
            plan: None,
            available_commands: Vec::new(),
            current_mode_id: None,
            meta: None,
        };
        let encoded = serde_json::to_value(&update).unwrap();
        assert_eq!(encoded["sessionUpdate"], "agent_message_chunk");
        assert_eq!(encoded["content"]["text"], "hi");
        assert!(encoded.get("toolCall").is_none());
        assert!(encoded.get("plan").is_none());
        assert!(encoded.get("availableCommands").is_none());
    }

    #[test]
    fn plan_update_carries_its_entries() {
        let update = SessionUpdate {
            kind: SessionUpdateType::Plan,
            content: None,
            tool_call: None,
            tool_call_update: None,
            plan: Some(Plan {
                entries: vec![PlanEntry {
                    content: "read the file".to_string(),
                    priority: PlanEntryPriority::High,
                    status: PlanEntryStatus::InProgress,
                    meta: None,
                }],
                meta: None,
            }),
            available_commands: Vec::new(),
            current_mode_id: None,
            meta: None,
        };
        let encoded = serde_json::to_value(&update).unwrap();
        assert_eq!(encoded["sessionUpdate"], "plan");
        assert_eq!(encoded["plan"]["entries"][0]["status"], "in_progress");
        assert_eq!(encoded["plan"]["entries"][0]["priority"], "high");
    }

    #[test]
    fn available_commands_update_lists_commands_at_top_level() {
        let update = SessionUpdate {
            kind: SessionUpdateType::AvailableCommandsUpdate,
            content: None,
            tool_call: None,
            tool_call_update: None,
            plan: None,
            available_commands: vec![AvailableCommand {
                name: "explain".to_string(),
                description: "Explain the selection".to_string(),
                input_hint: None,
                meta: None,
            }],
            current_mode_id: None,
            meta: None,
        };
        let encoded = serde_json::to_value(&update).unwrap();
        assert_eq!(encoded["sessionUpdate"], "available_commands_update");
        assert_eq!(encoded["availableCommands"][0]["name"], "explain");
    }

    #[test]
    fn current_mode_update_carries_the_new_mode_id() {
        let update = SessionUpdate {
            kind: SessionUpdateType::CurrentModeUpdate,
            content: None,
            tool_call: None,
            tool_call_update: None,
            plan: None,
            available_commands: Vec::new(),
            current_mode_id: Some(SessionModeId::from("yolo")),
            meta: None,
        };
        let encoded = serde_json::to_value(&update).unwrap();
        assert_eq!(encoded["sessionUpdate"], "current_mode_update");
        assert_eq!(encoded["currentModeId"], "yolo");
    }

    #[test]
    fn permission_option_kind_uses_snake_case() {
        let encoded = serde_json::to_value(PermissionOptionKind::RejectAlways).unwrap();
        assert_eq!(encoded, "reject_always");
    }
}
