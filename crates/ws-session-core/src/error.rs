use thiserror::Error;

/// EIP-1193 code a provider returns when the user declines a request.
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{message}")]
    UserRejected { message: String },
    #[error("{message}")]
    Rpc { code: Option<i64>, message: String },
    #[error("wallet provider not available")]
    Unavailable,
    #[error("no connected account")]
    NotConnected,
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Classify a provider failure by its numeric code.
    pub fn from_rpc(code: Option<i64>, message: impl Into<String>) -> Self {
        let message = message.into();
        if code == Some(USER_REJECTED_CODE) {
            Self::UserRejected { message }
        } else {
            Self::Rpc { code, message }
        }
    }

    pub fn is_user_rejected(&self) -> bool {
        matches!(self, Self::UserRejected { .. })
    }
}

/// Failure of the best-effort server session notification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("session request failed: {0}")]
    Transport(String),
    #[error("session response could not be decoded: {0}")]
    Decode(String),
    #[error("server did not accept the session update")]
    Rejected,
}
