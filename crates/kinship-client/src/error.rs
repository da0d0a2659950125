use thiserror::Error;

use kinship_shared::{ChatId, ProtocolError, UserId};
use kinship_store::StoreError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The body did not decode, or its envelope was not a success.
    #[error("Malformed response: {0}")]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Chat {0} is not loaded")]
    UnknownChat(ChatId),

    #[error("User {0} is not in the current list")]
    UnknownUser(UserId),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("A post needs text or at least one image")]
    EmptyPost,

    #[error("Upload {name} is too large: {size} bytes (max {max})")]
    UploadTooLarge { name: String, size: usize, max: usize },

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// 404 is how the server says "nothing here yet" for chats and messages.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let err = ClientError::Status {
            status: 404,
            message: "no chats".into(),
        };
        assert!(err.is_not_found());
        assert!(!ClientError::NotAuthenticated.is_not_found());
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: ClientError = StoreError::EmptyComment.into();
        assert_eq!(err.to_string(), "Comment cannot be empty");
    }
}
