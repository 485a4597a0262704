use thiserror::Error;

#[derive(Error, Debug)]
pub enum McpError {
    #[error("JSON-RPC error: {0}")]
    JsonRpc(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),
}

impl McpError {
    /// JSON-RPC error code reported to the client for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::Serialization(_) | Self::InvalidRequest(_) => -32602,
            Self::JsonRpc(_) => -32600,
            Self::NotFound(_) => -32601,
            Self::Config(_) | Self::Io(_) => -32603,
        }
    }
}

pub type Result<T> = std::result::Result<T, McpError>;
