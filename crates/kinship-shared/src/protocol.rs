use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::STATUS_SUCCESS;
use crate::error::ProtocolError;
use crate::models::{Chat, Comment, Message, Post, User};
use crate::types::{ChatId, UserId};

/// Response wrapper used by every endpoint: `{ "status": ..., "data": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data: Some(data),
        }
    }

    /// Unwrap the payload, rejecting any non-success status or missing data.
    pub fn into_data(self) -> Result<T, ProtocolError> {
        if self.status != STATUS_SUCCESS {
            return Err(ProtocolError::Status(self.status));
        }
        self.data.ok_or(ProtocolError::MissingData)
    }

    /// Accept a success status whether or not a payload came with it.
    pub fn into_ack(self) -> Result<Option<T>, ProtocolError> {
        if self.status != STATUS_SUCCESS {
            return Err(ProtocolError::Status(self.status));
        }
        Ok(self.data)
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a response body and unwrap its payload in one step.
    pub fn decode(body: &[u8]) -> Result<T, ProtocolError> {
        let envelope: Envelope<T> = serde_json::from_slice(body)?;
        envelope.into_data()
    }

    /// Like [`Envelope::decode`] but tolerates an absent payload.
    pub fn decode_ack(body: &[u8]) -> Result<Option<T>, ProtocolError> {
        let envelope: Envelope<T> = serde_json::from_slice(body)?;
        envelope.into_ack()
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Body of `PATCH /posts/{id}`. Only the flags being changed are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share: Option<bool>,
}

impl PostUpdate {
    pub fn like(liked: bool) -> Self {
        Self {
            like: Some(liked),
            share: None,
        }
    }

    pub fn share() -> Self {
        Self {
            like: None,
            share: Some(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChat {
    pub id1: UserId,
    pub id2: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub chat: ChatId,
    pub sender: UserId,
    pub receiver: UserId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub to: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendDecision {
    pub decision: bool,
}

// ---------------------------------------------------------------------------
// Response payloads (the `data` member of the envelope)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersData {
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendsData {
    #[serde(default)]
    pub friends: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsData {
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Payload of a post mutation. The server may or may not echo the post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostData {
    #[serde(default)]
    pub post: Option<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsData {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatsData {
    #[serde(default)]
    pub chats: Vec<Chat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatData {
    #[serde(default)]
    pub chat: Option<Chat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesData {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageData {
    pub message: Message,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostId;

    #[test]
    fn test_envelope_success() {
        let body = br#"{"status":"success","data":{"posts":[{"_id":"p1","likesCount":3}]}}"#;
        let data: PostsData = Envelope::decode(body).unwrap();
        assert_eq!(data.posts.len(), 1);
        assert_eq!(data.posts[0].id, PostId::from("p1"));
        assert_eq!(data.posts[0].likes_count, 3);
    }

    #[test]
    fn test_envelope_rejects_failed_status() {
        let body = br#"{"status":"fail","data":{"posts":[]}}"#;
        let err = Envelope::<PostsData>::decode(body).unwrap_err();
        assert!(matches!(err, ProtocolError::Status(s) if s == "fail"));
    }

    #[test]
    fn test_envelope_rejects_missing_data() {
        let body = br#"{"status":"success"}"#;
        let err = Envelope::<PostsData>::decode(body).unwrap_err();
        assert!(matches!(err, ProtocolError::MissingData));
    }

    #[test]
    fn test_ack_tolerates_missing_data() {
        let body = br#"{"status":"success"}"#;
        let data = Envelope::<PostData>::decode_ack(body).unwrap();
        assert!(data.is_none());

        let body = br#"{"status":"error","message":"nope"}"#;
        assert!(Envelope::<PostData>::decode_ack(body).is_err());
    }

    #[test]
    fn test_envelope_rejects_non_envelope() {
        let err = Envelope::<PostsData>::decode(br#"[1,2,3]"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));
    }

    #[test]
    fn test_post_update_only_sends_changed_flag() {
        assert_eq!(
            serde_json::to_value(PostUpdate::like(true)).unwrap(),
            serde_json::json!({ "like": true })
        );
        assert_eq!(
            serde_json::to_value(PostUpdate::share()).unwrap(),
            serde_json::json!({ "share": true })
        );
    }

    #[test]
    fn test_signup_field_names() {
        let req = SignupRequest {
            username: "ann".into(),
            email: "ann@example.com".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        };
        let v = serde_json::to_value(req).unwrap();
        assert_eq!(v["confirmPassword"], "pw");
    }
}
