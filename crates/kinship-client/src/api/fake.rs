//! Scripted in-memory [`SocialApi`] for screen tests.
//!
//! Every call is recorded as `(method, json body)`; responses come from the
//! [`Script`]. Methods listed in `failing` answer HTTP 500, those in
//! `not_found` answer 404.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::broadcast;

use kinship_shared::protocol::{LoginRequest, NewChat, NewMessage, PostUpdate, SignupRequest};
use kinship_shared::{
    Chat, ChatId, Comment, Feed, Message, Notification, NotificationId, Post, PostId, User, UserId,
};

use super::{PostDraft, ProfileUpdate, SocialApi};
use crate::error::{ClientError, Result};
use crate::events::UiEvent;
use crate::state::AppContext;

#[derive(Debug, Default)]
pub(crate) struct Script {
    pub user: Option<User>,
    pub posts: HashMap<String, Vec<Post>>,
    pub comments: HashMap<PostId, Vec<Comment>>,
    pub post_echo: Option<Post>,
    pub users: Vec<User>,
    pub friends: Vec<User>,
    pub chats: Vec<Chat>,
    pub messages: HashMap<ChatId, Vec<Message>>,
    pub created_chat: Option<Chat>,
    pub failing: HashSet<&'static str>,
    pub not_found: HashSet<&'static str>,
    pub calls: Vec<(&'static str, Value)>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    script: Mutex<Script>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, f: impl FnOnce(&mut Script)) {
        f(&mut self.script.lock().unwrap());
    }

    pub fn fail(&self, method: &'static str) {
        self.script(|s| {
            s.failing.insert(method);
        });
    }

    pub fn recover(&self, method: &'static str) {
        self.script(|s| {
            s.failing.remove(method);
        });
    }

    pub fn not_found(&self, method: &'static str) {
        self.script(|s| {
            s.not_found.insert(method);
        });
    }

    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.script
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(m, _)| *m == method)
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls_to(method).len()
    }

    fn record(&self, method: &'static str, body: Value) -> Result<()> {
        let mut script = self.script.lock().unwrap();
        script.calls.push((method, body));
        if script.failing.contains(method) {
            return Err(ClientError::Status {
                status: 500,
                message: format!("{method} failed"),
            });
        }
        if script.not_found.contains(method) {
            return Err(ClientError::Status {
                status: 404,
                message: "Not found".into(),
            });
        }
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Script) -> T) -> T {
        f(&self.script.lock().unwrap())
    }
}

#[async_trait]
impl SocialApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> Result<User> {
        self.record("login", json!({ "email": request.email }))?;
        self.read(|s| s.user.clone()).ok_or(ClientError::Status {
            status: 401,
            message: "Invalid credentials".into(),
        })
    }

    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        self.record("signup", serde_json::to_value(request).unwrap())
    }

    async fn signout(&self) -> Result<()> {
        self.record("signout", Value::Null)
    }

    async fn me(&self) -> Result<User> {
        self.record("me", Value::Null)?;
        self.read(|s| s.user.clone()).ok_or(ClientError::NotAuthenticated)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        self.record(
            "update_profile",
            json!({
                "username": update.username,
                "firstName": update.first_name,
                "lastName": update.last_name,
                "picture": update.picture.as_ref().map(|p| p.file_name.clone()),
            }),
        )
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        self.record("search_users", json!({ "q": query }))?;
        Ok(self.read(|s| s.users.clone()))
    }

    async fn list_friends(&self) -> Result<Vec<User>> {
        self.record("list_friends", Value::Null)?;
        Ok(self.read(|s| s.friends.clone()))
    }

    async fn remove_friend(&self, id: &UserId) -> Result<()> {
        self.record("remove_friend", json!({ "id": id }))
    }

    async fn send_friend_request(&self, to: &UserId) -> Result<()> {
        self.record("send_friend_request", json!({ "to": to }))
    }

    async fn decide_friend_request(&self, id: &NotificationId, accept: bool) -> Result<()> {
        self.record("decide_friend_request", json!({ "id": id, "decision": accept }))
    }

    async fn list_posts(&self, feed: &Feed) -> Result<Vec<Post>> {
        self.record("list_posts", json!({ "feed": feed.to_string() }))?;
        Ok(self.read(|s| s.posts.get(&feed.to_string()).cloned().unwrap_or_default()))
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<()> {
        self.record(
            "create_post",
            json!({ "content": draft.content, "media": draft.media.len() }),
        )
    }

    async fn update_post(&self, id: &PostId, update: &PostUpdate) -> Result<Option<Post>> {
        let mut body = serde_json::to_value(update).unwrap();
        body["id"] = json!(id);
        self.record("update_post", body)?;
        Ok(self.read(|s| s.post_echo.clone()))
    }

    async fn list_comments(&self, id: &PostId) -> Result<Vec<Comment>> {
        self.record("list_comments", json!({ "id": id }))?;
        // Suspend once, like a real round trip, so overlapping taps interleave.
        tokio::task::yield_now().await;
        Ok(self.read(|s| s.comments.get(id).cloned().unwrap_or_default()))
    }

    async fn add_comment(&self, id: &PostId, content: &str) -> Result<()> {
        self.record("add_comment", json!({ "id": id, "content": content }))
    }

    async fn list_chats(&self) -> Result<Vec<Chat>> {
        self.record("list_chats", Value::Null)?;
        Ok(self.read(|s| s.chats.clone()))
    }

    async fn create_chat(&self, request: &NewChat) -> Result<Option<Chat>> {
        self.record("create_chat", serde_json::to_value(request).unwrap())?;
        Ok(self.read(|s| s.created_chat.clone()))
    }

    async fn list_messages(&self, chat: &ChatId) -> Result<Vec<Message>> {
        self.record("list_messages", json!({ "chat": chat }))?;
        Ok(self.read(|s| s.messages.get(chat).cloned().unwrap_or_default()))
    }

    async fn send_message(&self, message: &NewMessage) -> Result<Message> {
        let body = serde_json::to_value(message).unwrap();
        self.record("send_message", body)?;
        let count = self.count("send_message");
        // The server echoes the message without populating the sender.
        Ok(serde_json::from_value(json!({
            "_id": format!("sent-{count}"),
            "chat": message.chat,
            "content": message.content,
        }))
        .unwrap())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub(crate) fn context(api: Arc<FakeApi>) -> AppContext {
    AppContext::with_api(api, "http://media.test", 16).unwrap()
}

pub(crate) fn context_with_events(api: Arc<FakeApi>) -> (AppContext, broadcast::Receiver<UiEvent>) {
    let ctx = context(api);
    let rx = ctx.events.subscribe();
    (ctx, rx)
}

/// Every event emitted so far.
pub(crate) fn drain(rx: &mut broadcast::Receiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub(crate) fn alerts(events: &[UiEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, UiEvent::Alert { .. }))
        .count()
}

pub(crate) fn user(id: &str, username: &str) -> User {
    serde_json::from_value(json!({ "_id": id, "username": username })).unwrap()
}

pub(crate) fn user_with_notifications(id: &str, username: &str, from: &[(&str, &str)]) -> User {
    let mut u = user(id, username);
    u.notifications = from
        .iter()
        .map(|(nid, who)| -> Notification {
            serde_json::from_value(json!({ "_id": nid, "from": { "_id": who, "username": who } }))
                .unwrap()
        })
        .collect();
    u
}

pub(crate) fn post(id: &str, likes: i64, media: &[&str]) -> Post {
    serde_json::from_value(json!({
        "_id": id,
        "content": format!("post {id}"),
        "likesCount": likes,
        "mediaFiles": media,
        "postedBy": { "_id": "author", "username": "author" },
    }))
    .unwrap()
}

pub(crate) fn comment(id: &str, content: &str) -> Comment {
    serde_json::from_value(json!({ "_id": id, "content": content })).unwrap()
}

pub(crate) fn chat(id: &str, a: (&str, &str), b: (&str, &str)) -> Chat {
    serde_json::from_value(json!({
        "_id": id,
        "user1": { "_id": a.0, "username": a.1 },
        "user2": { "_id": b.0, "username": b.1 },
    }))
    .unwrap()
}

pub(crate) fn message(id: &str, chat: &str, sender: &str, content: &str) -> Message {
    serde_json::from_value(json!({
        "_id": id,
        "chat": chat,
        "sender": { "_id": sender, "username": sender },
        "content": content,
    }))
    .unwrap()
}
