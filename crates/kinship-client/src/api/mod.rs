//! The remote data source.
//!
//! Screens depend on the [`SocialApi`] trait, never on HTTP directly. The
//! production implementation is [`http::HttpApi`]; tests substitute a
//! scripted fake.

pub mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use bytes::Bytes;

use kinship_shared::protocol::{LoginRequest, NewChat, NewMessage, PostUpdate, SignupRequest};
use kinship_shared::{Chat, ChatId, Comment, Feed, Message, NotificationId, Post, PostId, User, UserId};

use crate::error::{ClientError, Result};

pub use http::HttpApi;

/// A file attached to a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// The picker on the phone always produced JPEG.
    pub fn jpeg(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self::new(file_name, "image/jpeg", bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fields of the profile edit form. Blank text fields keep the server value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub picture: Option<Upload>,
}

/// A post being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub content: String,
    pub media: Vec<Upload>,
}

/// Reject any upload above `max` bytes before it touches the network.
pub fn check_upload_sizes<'a>(uploads: impl IntoIterator<Item = &'a Upload>, max: usize) -> Result<()> {
    for upload in uploads {
        if upload.len() > max {
            return Err(ClientError::UploadTooLarge {
                name: upload.file_name.clone(),
                size: upload.len(),
                max,
            });
        }
    }
    Ok(())
}

#[async_trait]
pub trait SocialApi: Send + Sync {
    // -- Auth --

    async fn login(&self, request: &LoginRequest) -> Result<User>;
    async fn signup(&self, request: &SignupRequest) -> Result<()>;
    async fn signout(&self) -> Result<()>;

    // -- Users and friends --

    async fn me(&self) -> Result<User>;
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()>;
    async fn search_users(&self, query: &str) -> Result<Vec<User>>;
    async fn list_friends(&self) -> Result<Vec<User>>;
    async fn remove_friend(&self, id: &UserId) -> Result<()>;
    async fn send_friend_request(&self, to: &UserId) -> Result<()>;
    async fn decide_friend_request(&self, id: &NotificationId, accept: bool) -> Result<()>;

    // -- Posts --

    async fn list_posts(&self, feed: &Feed) -> Result<Vec<Post>>;
    async fn create_post(&self, draft: &PostDraft) -> Result<()>;
    /// Returns the updated post when the server echoes it.
    async fn update_post(&self, id: &PostId, update: &PostUpdate) -> Result<Option<Post>>;
    async fn list_comments(&self, id: &PostId) -> Result<Vec<Comment>>;
    async fn add_comment(&self, id: &PostId, content: &str) -> Result<()>;

    // -- Chats --

    async fn list_chats(&self) -> Result<Vec<Chat>>;
    async fn create_chat(&self, request: &NewChat) -> Result<Option<Chat>>;
    async fn list_messages(&self, chat: &ChatId) -> Result<Vec<Message>>;
    async fn send_message(&self, message: &NewMessage) -> Result<Message>;
}
