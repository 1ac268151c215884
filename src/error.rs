// Error handling for tableau-locator

use thiserror::Error;

/// Errors raised while building contexts, resolving endpoints or sequencing uploads
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("Invalid server context: {reason}")]
    InvalidContext { reason: String },

    #[error("Unknown server version: {0}")]
    UnknownServerVersion(String),

    #[error("No protocol found in {url}")]
    MissingProtocol { url: String },

    #[error("Could not infer version of server from {url}")]
    UnrecognizedUrlShape { url: String },

    #[error("Invalid template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Template replacement was incomplete: {partial}")]
    TemplateIncomplete { partial: String },

    #[error("Empty value bound to placeholder '{placeholder}'")]
    EmptyBinding { placeholder: String },

    #[error("Invalid upload session state: {reason}")]
    InvalidSessionState { reason: String },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Unknown placeholder: {0}")]
    UnknownPlaceholder(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocatorError {
    pub fn invalid_context(reason: impl Into<String>) -> Self {
        Self::InvalidContext {
            reason: reason.into(),
        }
    }

    pub fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_session(reason: impl Into<String>) -> Self {
        Self::InvalidSessionState {
            reason: reason.into(),
        }
    }

    /// Wrap an error reported by an external transport
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LocatorError>;
