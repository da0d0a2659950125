//! State of one open chat: participants, messages and the composer.

use tracing::debug;

use kinship_shared::{Chat, ChatId, Message, UserId, UserRef};

use crate::error::{Result, StoreError};

/// Who sends and who receives when the signed-in user writes in a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub sender: UserId,
    pub receiver: UserId,
}

#[derive(Debug, Clone)]
pub struct ChatThread {
    chat_id: ChatId,
    user1: UserRef,
    user2: UserRef,
    messages: Vec<Message>,
    draft: String,
    sending: bool,
}

impl ChatThread {
    /// Seed a thread with the messages loaded by the chat list.
    pub fn new(chat: Chat, messages: Vec<Message>) -> Self {
        Self {
            chat_id: chat.id,
            user1: chat.user1,
            user2: chat.user2,
            messages,
            draft: String::new(),
            sending: false,
        }
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    pub fn participants(&self) -> (&UserRef, &UserRef) {
        (&self.user1, &self.user2)
    }

    /// The participant that is not `me`.
    pub fn peer(&self, me: &UserId) -> Option<&UserRef> {
        if &self.user1.id == me {
            Some(&self.user2)
        } else if &self.user2.id == me {
            Some(&self.user1)
        } else {
            None
        }
    }

    /// Messages in receipt order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn route_for(&self, me: &UserId) -> Result<Route> {
        let peer = self
            .peer(me)
            .ok_or_else(|| StoreError::NotAParticipant(me.clone()))?;
        Ok(Route {
            sender: me.clone(),
            receiver: peer.id.clone(),
        })
    }

    /// Validate the draft and mark the thread as sending.
    pub fn begin_send(&mut self, me: &UserId) -> Result<(Route, String)> {
        if self.sending {
            return Err(StoreError::SendInProgress);
        }
        let text = self.draft.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyMessage);
        }
        let text = text.to_string();
        let route = self.route_for(me)?;
        self.sending = true;
        Ok((route, text))
    }

    /// Finish a send. On success the server's message is appended and the
    /// draft cleared; on failure the draft is kept for a retry.
    pub fn finish_send(&mut self, confirmed: Option<Message>, me: &UserRef) -> bool {
        self.sending = false;
        let Some(mut message) = confirmed else {
            return false;
        };

        if message.sender.as_ref().map(|s| &s.id) != Some(&me.id) {
            message.sender = Some(me.clone());
        }
        self.draft.clear();
        self.append(message)
    }

    /// Append a message unless one with the same id is already shown.
    pub fn append(&mut self, message: Message) -> bool {
        if self.messages.iter().any(|m| m.id == message.id) {
            debug!(chat = %self.chat_id.short(), message = %message.id.short(), "Duplicate message ignored");
            return false;
        }
        self.messages.push(message);
        true
    }
}
