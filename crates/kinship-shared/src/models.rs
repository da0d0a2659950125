//! Entities as the API serialises them.
//!
//! The server owns all of these; the client only caches them for the lifetime
//! of a screen. Every field except the identifier is defaulted so a partial
//! payload still decodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ChatId, CommentId, MessageId, NotificationId, PostId, UserId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A full user record, as returned by `/users/me`, login and search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Relative media path of the avatar.
    #[serde(default)]
    pub profile_picture: Option<String>,
    /// Pending friend requests addressed to this user.
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl User {
    pub fn to_ref(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }

    /// "First Last" when either part is known, otherwise the username.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            self.username.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// A user reference embedded in another entity.
///
/// The API sends either a populated `{ "_id", "username" }` object or just
/// the bare id string, depending on the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "UserRefRepr")]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub username: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UserRefRepr {
    Populated {
        #[serde(rename = "_id")]
        id: UserId,
        #[serde(default)]
        username: String,
    },
    Bare(UserId),
}

impl From<UserRefRepr> for UserRef {
    fn from(repr: UserRefRepr) -> Self {
        match repr {
            UserRefRepr::Populated { id, username } => Self { id, username },
            UserRefRepr::Bare(id) => Self {
                id,
                username: String::new(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Post / Comment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    #[serde(default)]
    pub content: String,
    /// Relative media paths, resolved against the configured host.
    #[serde(default)]
    pub media_files: Vec<String>,
    #[serde(default)]
    pub posted_by: Option<UserRef>,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: CommentId,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "user", alias = "author")]
    pub posted_by: Option<UserRef>,
    /// Parent post.
    #[serde(default)]
    pub post: Option<PostId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Chat / Message
// ---------------------------------------------------------------------------

/// A one-to-one conversation between two users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    #[serde(rename = "_id")]
    pub id: ChatId,
    pub user1: UserRef,
    pub user2: UserRef,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: MessageId,
    #[serde(default)]
    pub chat: Option<ChatId>,
    #[serde(default)]
    pub sender: Option<UserRef>,
    #[serde(default)]
    pub receiver: Option<UserRef>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A pending friend request from `from`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: NotificationId,
    pub from: UserRef,
}
