use thiserror::Error;

/// Errors raised around the annotator: message routing and the browser session.
///
/// The annotator itself never produces one of these; bad candidate input is a silent no-op.
#[derive(Debug, Error)]
pub enum MapsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid parameters for {tool}: {reason}")]
    InvalidParams { tool: String, reason: String },

    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Script evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),
}

pub type Result<T> = std::result::Result<T, MapsError>;
