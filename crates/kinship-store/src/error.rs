use thiserror::Error;

use kinship_shared::{NotificationId, PostId, UserId};

/// Errors produced by the store layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The post is not part of the currently loaded list.
    #[error("Post {0} is not loaded")]
    UnknownPost(PostId),

    /// The notification is not part of the currently loaded list.
    #[error("Notification {0} is not loaded")]
    UnknownNotification(NotificationId),

    /// A decision for this notification is already in flight.
    #[error("Notification {0} is already being processed")]
    NotificationBusy(NotificationId),

    /// Comment text was empty or whitespace only.
    #[error("Comment cannot be empty")]
    EmptyComment,

    /// Message text was empty or whitespace only.
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// A message is already being sent in this chat.
    #[error("A message is already being sent")]
    SendInProgress,

    /// The signed-in user is neither participant of the chat.
    #[error("User {0} is not a participant of this chat")]
    NotAParticipant(UserId),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
