use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrudelError {
    #[error("Front matter parse error: {0}")]
    Parse(String),

    #[error("Include depth limit ({limit}) exceeded at '@{path}'")]
    DepthExceeded { path: String, limit: u8 },

    #[error("Path traversal blocked for include '@{0}'")]
    PathTraversal(String),

    #[error("Included file not found: '{0}'")]
    FileNotFound(String),

    #[error("Command not allowed: {0}")]
    CommandNotAllowed(String),

    #[error("Dangerous character '{character}' in argument '{argument}'")]
    DangerousArgument { argument: String, character: char },

    #[error("Command '{command}' timed out after {timeout_ms}ms")]
    Timeout { command: String, timeout_ms: u64 },

    #[error("Command '{command}' failed: {message}")]
    Execution { command: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StrudelError>;
