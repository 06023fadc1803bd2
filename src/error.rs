//! Error types for the interaction pipeline

use crate::domain::InputMode;

/// Errors returned by the orchestrator and its channels
#[derive(Debug, thiserror::Error)]
pub enum InteractionError {
    #[error("Orchestrator is not active (call initialize first)")]
    NotActive,

    #[error("Orchestrator has been shut down")]
    AlreadyShutDown,

    #[error("No {0} input channel is configured")]
    ChannelUnavailable(InputMode),

    #[error("{source_mode} recognition failed: {message}")]
    Recognition {
        source_mode: InputMode,
        message: String,
    },
}

impl InteractionError {
    pub fn recognition(source_mode: InputMode, message: impl Into<String>) -> Self {
        Self::Recognition {
            source_mode,
            message: message.into(),
        }
    }
}
