//! Reqwest-backed [`SocialApi`].
//!
//! Owns transport details only: URL building, the session cookie, multipart
//! encoding, HTTP status mapping and envelope decoding.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, warn};
use url::Url;

use kinship_shared::constants::{FIELD_POST_CONTENT, FIELD_POST_MEDIA, FIELD_PROFILE_PICTURE};
use kinship_shared::protocol::{
    ChatData, ChatsData, CommentsData, Envelope, FriendDecision, FriendRequest, FriendsData,
    LoginRequest, MessageData, MessagesData, NewChat, NewComment, NewMessage, PostData, PostUpdate,
    PostsData, SignupRequest, UserData, UsersData,
};
use kinship_shared::{Chat, ChatId, Comment, Feed, Message, NotificationId, Post, PostId, User, UserId};

use super::{check_upload_sizes, PostDraft, ProfileUpdate, SocialApi, Upload};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Longest error body kept in a [`ClientError::Status`] message.
const MAX_ERROR_BODY: usize = 256;

pub struct HttpApi {
    client: Client,
    config: ClientConfig,
}

impl HttpApi {
    /// Build a client that keeps the server's session cookie between calls.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        self.config.endpoint(segments.iter().copied())
    }

    /// Send and return the raw body of a 2xx response.
    async fn execute(&self, request: RequestBuilder) -> Result<Bytes> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = String::from_utf8_lossy(&body)
                .chars()
                .take(MAX_ERROR_BODY)
                .collect::<String>();
            debug!(%url, status = status.as_u16(), "Request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }

    /// Send and unwrap the `data` member of a success envelope.
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.execute(request).await?;
        Ok(Envelope::<T>::decode(&body)?)
    }

    /// Send and require a success envelope, with or without a payload.
    async fn ack<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let body = self.execute(request).await?;
        Ok(Envelope::<T>::decode_ack(&body)?)
    }
}

fn file_part(upload: &Upload) -> Result<Part> {
    Ok(Part::bytes(upload.bytes.to_vec())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.mime)?)
}

#[async_trait]
impl SocialApi for HttpApi {
    async fn login(&self, request: &LoginRequest) -> Result<User> {
        let data: UserData = self
            .fetch(self.client.post(self.url(&["users", "login"])?).json(request))
            .await?;
        Ok(data.user)
    }

    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        self.ack::<IgnoredAny>(self.client.post(self.url(&["users", "signup"])?).json(request))
            .await?;
        Ok(())
    }

    async fn signout(&self) -> Result<()> {
        // The body is not an envelope on every server version; only the
        // status matters here.
        self.execute(self.client.get(self.url(&["users", "signout"])?)).await?;
        Ok(())
    }

    async fn me(&self) -> Result<User> {
        let data: UserData = self.fetch(self.client.get(self.url(&["users", "me"])?)).await?;
        Ok(data.user)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        check_upload_sizes(update.picture.iter(), self.config.max_upload_bytes)?;

        let mut form = Form::new()
            .text("username", update.username.clone())
            .text("firstName", update.first_name.clone())
            .text("lastName", update.last_name.clone());
        if let Some(picture) = &update.picture {
            form = form.part(FIELD_PROFILE_PICTURE, file_part(picture)?);
        }

        self.ack::<IgnoredAny>(self.client.post(self.url(&["users", "updateProfile"])?).multipart(form))
            .await?;
        Ok(())
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        let data: UsersData = self
            .fetch(self.client.get(self.url(&["users", "search"])?).query(&[("q", query)]))
            .await?;
        Ok(data.users)
    }

    async fn list_friends(&self) -> Result<Vec<User>> {
        let data: FriendsData = self.fetch(self.client.get(self.url(&["users", "friends"])?)).await?;
        Ok(data.friends)
    }

    async fn remove_friend(&self, id: &UserId) -> Result<()> {
        let url = self.url(&["users", "friends", id.as_str()])?;
        self.ack::<IgnoredAny>(self.client.delete(url)).await?;
        Ok(())
    }

    async fn send_friend_request(&self, to: &UserId) -> Result<()> {
        let body = FriendRequest { to: to.clone() };
        self.ack::<IgnoredAny>(
            self.client
                .post(self.url(&["users", "sendFriendRequest"])?)
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn decide_friend_request(&self, id: &NotificationId, accept: bool) -> Result<()> {
        let url = self.url(&["notifications", id.as_str()])?;
        let body = FriendDecision { decision: accept };
        self.ack::<IgnoredAny>(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    async fn list_posts(&self, feed: &Feed) -> Result<Vec<Post>> {
        let data: PostsData = self.fetch(self.client.get(self.url(&feed.segments())?)).await?;
        Ok(data.posts)
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<()> {
        check_upload_sizes(&draft.media, self.config.max_upload_bytes)?;

        let mut form = Form::new().text(FIELD_POST_CONTENT, draft.content.clone());
        for upload in &draft.media {
            form = form.part(FIELD_POST_MEDIA, file_part(upload)?);
        }

        self.ack::<IgnoredAny>(self.client.post(self.url(&["posts"])?).multipart(form))
            .await?;
        Ok(())
    }

    async fn update_post(&self, id: &PostId, update: &PostUpdate) -> Result<Option<Post>> {
        let url = self.url(&["posts", id.as_str()])?;
        let data: Option<PostData> = self.ack(self.client.patch(url).json(update)).await?;
        let post = data.and_then(|d| d.post);
        if let Some(p) = &post {
            if &p.id != id {
                warn!(requested = %id.short(), echoed = %p.id.short(), "Server echoed a different post");
                return Ok(None);
            }
        }
        Ok(post)
    }

    async fn list_comments(&self, id: &PostId) -> Result<Vec<Comment>> {
        let url = self.url(&["posts", "comment", id.as_str()])?;
        let data: CommentsData = self.fetch(self.client.get(url)).await?;
        Ok(data.comments)
    }

    async fn add_comment(&self, id: &PostId, content: &str) -> Result<()> {
        let url = self.url(&["posts", "comment", id.as_str()])?;
        let body = NewComment {
            content: content.to_string(),
        };
        self.ack::<IgnoredAny>(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    async fn list_chats(&self) -> Result<Vec<Chat>> {
        let data: ChatsData = self.fetch(self.client.get(self.url(&["chats"])?)).await?;
        Ok(data.chats)
    }

    async fn create_chat(&self, request: &NewChat) -> Result<Option<Chat>> {
        let data: Option<ChatData> = self
            .ack(self.client.post(self.url(&["chats"])?).json(request))
            .await?;
        Ok(data.and_then(|d| d.chat))
    }

    async fn list_messages(&self, chat: &ChatId) -> Result<Vec<Message>> {
        let url = self.url(&["chats", "message", chat.as_str()])?;
        let data: MessagesData = self.fetch(self.client.get(url)).await?;
        Ok(data.messages)
    }

    async fn send_message(&self, message: &NewMessage) -> Result<Message> {
        let data: MessageData = self
            .fetch(self.client.post(self.url(&["chats", "message"])?).json(message))
            .await?;
        Ok(data.message)
    }
}
