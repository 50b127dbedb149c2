use thiserror::Error;

/// Everything that can go wrong between issuing a request and applying its reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Network or HTTP failure
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// The reply parsed but a field was missing or unusable
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// The server refused the submitted guess
    #[error("guess {outs} was rejected by the server")]
    InvalidGuess { outs: u32 },

    /// The server answered with a non-ok status
    #[error("server rejected {request}")]
    ServerRejected { request: &'static str },

    /// The reply belongs to a game that has since been restarted
    #[error("stale {request} reply from game generation {generation}")]
    StaleResponse {
        request: &'static str,
        generation: u64,
    },
}

impl ClientError {
    pub fn transport(message: impl Into<String>) -> Self {
        ClientError::Transport {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ClientError::MalformedResponse {
            message: message.into(),
        }
    }

    /// Whether the user can usefully re-issue the failed request
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Transport { .. } | ClientError::MalformedResponse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
