//! # kinship-shared
//!
//! Types shared by the Kinship client crates: entity identifiers, the API's
//! wire models and request/response payloads, media path resolution and
//! protocol errors.

pub mod constants;
pub mod error;
pub mod media;
pub mod models;
pub mod protocol;
pub mod types;

pub use error::{MediaError, ProtocolError};
pub use media::{MediaResolver, MediaView};
pub use models::{Chat, Comment, Message, Notification, Post, User, UserRef};
pub use types::{ChatId, CommentId, Feed, MessageId, NotificationId, PostId, UserId};
