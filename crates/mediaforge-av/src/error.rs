//! Error types for mediaforge-av.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a conversion.
///
/// Building options and compiling argument vectors never fails. Errors only
/// surface when the external tool is located or invoked.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The external tool ran but did not complete successfully.
    ///
    /// `error` describes the failed completion (spawn error or exit status),
    /// `output` holds whatever the tool printed before it stopped.
    #[error("{tool} error: {error}, output: {output}")]
    ToolFailed {
        tool: String,
        error: String,
        output: String,
    },

    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a tool execution failed error.
    pub fn tool_failed(
        tool: impl Into<String>,
        error: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            error: error.into(),
            output: output.into(),
        }
    }

    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
