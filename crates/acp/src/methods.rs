//! Wire method name constants, grouped by which side of the connection handles them.

/// Methods the client sends and the agent handles.
pub struct AgentMethodNames {
    pub initialize: &'static str,
    pub authenticate: &'static str,
    pub session_new: &'static str,
    pub session_load: &'static str,
    pub session_set_mode: &'static str,
    pub session_set_model: &'static str,
    pub session_prompt: &'static str,
    pub session_cancel: &'static str,
}

/// Methods the agent sends and the client handles.
pub struct ClientMethodNames {
    pub session_request_permission: &'static str,
    pub session_update: &'static str,
    pub fs_write_text_file: &'static str,
    pub fs_read_text_file: &'static str,
    pub terminal_create: &'static str,
    pub terminal_output: &'static str,
    pub terminal_release: &'static str,
    pub terminal_wait_for_exit: &'static str,
    pub terminal_kill: &'static str,
}

pub const AGENT_METHODS: AgentMethodNames = AgentMethodNames {
    initialize: "initialize",
    authenticate: "authenticate",
    session_new: "session/new",
    session_load: "session/load",
    session_set_mode: "session/set_mode",
    session_set_model: "session/set_model",
    session_prompt: "session/prompt",
    session_cancel: "session/cancel",
};

pub const CLIENT_METHODS: ClientMethodNames = ClientMethodNames {
    session_request_permission: "session/request_permission",
    session_update: "session/update",
    fs_write_text_file: "fs/write_text_file",
    fs_read_text_file: "fs/read_text_file",
    terminal_create: "terminal/create",
    terminal_output: "terminal/output",
    terminal_release: "terminal/release",
    terminal_wait_for_exit: "terminal/wait_for_exit",
    terminal_kill: "terminal/kill",
};

/// True when `method` is an extension method (a wire name prefixed with `_`).
pub fn is_extension_method(method: &str) -> bool {
    method.starts_with('_')
}

/// Strips the leading `_` from an extension method's wire name.
pub fn strip_extension_prefix(method: &str) -> &str {
    method.strip_prefix('_').unwrap_or(method)
}
