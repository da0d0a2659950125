use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use kinship_shared::protocol::NewMessage;
use kinship_shared::{ChatId, Message, UserRef};
use kinship_store::{ChatThread, StoreError};

use crate::error::Result;
use crate::session::Session;
use crate::state::AppContext;

/// One open conversation.
///
/// Seeded by [`super::chats::ChatListScreen::open`] with the messages it
/// loaded; this screen never fetches on its own.
pub struct ChatDetailScreen {
    ctx: AppContext,
    me: UserRef,
    thread: Mutex<ChatThread>,
}

impl ChatDetailScreen {
    pub fn new(ctx: AppContext, session: &Session, thread: ChatThread) -> Self {
        Self {
            ctx,
            me: session.user_ref(),
            thread: Mutex::new(thread),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChatThread> {
        self.thread.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn chat_id(&self) -> ChatId {
        self.lock().chat_id().clone()
    }

    /// Title of the screen: the other participant.
    pub fn peer(&self) -> Option<UserRef> {
        self.lock().peer(&self.me.id).cloned()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages().to_vec()
    }

    /// Whether a message was written by the signed-in user.
    pub fn is_mine(&self, message: &Message) -> bool {
        message.sender.as_ref().is_some_and(|s| s.id == self.me.id)
    }

    pub fn draft(&self) -> String {
        self.lock().draft().to_string()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.lock().set_draft(text);
    }

    pub fn is_sending(&self) -> bool {
        self.lock().is_sending()
    }

    /// Send the draft. Returns `true` when a new message was appended.
    pub async fn send(&self) -> Result<bool> {
        let (route, content, chat) = {
            let mut thread = self.lock();
            match thread.begin_send(&self.me.id) {
                Ok((route, content)) => (route, content, thread.chat_id().clone()),
                Err(e @ StoreError::EmptyMessage) => {
                    debug!(chat = %thread.chat_id().short(), "Ignoring blank message");
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            }
        };

        let request = NewMessage {
            chat: chat.clone(),
            sender: route.sender,
            receiver: route.receiver,
            content,
        };

        match self.ctx.api.send_message(&request).await {
            Ok(message) => Ok(self.lock().finish_send(Some(message), &self.me)),
            Err(e) => {
                self.lock().finish_send(None, &self.me);
                warn!(chat = %chat.short(), error = %e, "Error sending message");
                self.ctx
                    .events
                    .alert("Error", "Failed to send message. Please try again.");
                Err(e)
            }
        }
    }
}
