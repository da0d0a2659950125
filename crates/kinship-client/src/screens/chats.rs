//! The chat list and chat creation.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use kinship_shared::protocol::NewChat;
use kinship_shared::{Chat, ChatId, UserId, UserRef};
use kinship_store::{ChatThread, LoadState};

use super::chat_detail::ChatDetailScreen;
use crate::error::{ClientError, Result};
use crate::session::Session;
use crate::state::AppContext;

#[derive(Debug, Default)]
struct ChatListState {
    chats: Vec<Chat>,
    load: LoadState,
    opening: HashSet<ChatId>,
}

pub struct ChatListScreen {
    ctx: AppContext,
    session: Session,
    state: Mutex<ChatListState>,
}

impl ChatListScreen {
    pub fn new(ctx: AppContext, session: Session) -> Self {
        Self {
            ctx,
            session,
            state: Mutex::new(ChatListState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChatListState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn chats(&self) -> Vec<Chat> {
        self.lock().chats.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.lock().load.clone()
    }

    /// The participant of `chat` that is not the signed-in user.
    pub fn peer_of<'a>(&self, chat: &'a Chat) -> &'a UserRef {
        if &chat.user1.id == self.session.user_id() {
            &chat.user2
        } else {
            &chat.user1
        }
    }

    /// Whether messages for `chat` are being loaded.
    pub fn is_opening(&self, chat: &ChatId) -> bool {
        self.lock().opening.contains(chat)
    }

    /// Reload the chat list. A 404 from the server means there are no chats.
    pub async fn focus(&self) -> Result<()> {
        self.lock().load = LoadState::Loading;

        let chats = match self.ctx.api.list_chats().await {
            Ok(chats) => chats,
            Err(e) if e.is_not_found() => {
                debug!("No chats yet");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch chats");
                self.lock().load = LoadState::Failed(e.to_string());
                return Err(e);
            }
        };

        let mut state = self.lock();
        state.chats = chats;
        state.load = LoadState::Ready;
        Ok(())
    }

    /// Load a chat's messages and hand back its detail screen.
    ///
    /// `Ok(None)` means the chat was not opened: it has no messages yet, or
    /// it is already being opened.
    pub async fn open(&self, chat_id: &ChatId) -> Result<Option<ChatDetailScreen>> {
        let chat = {
            let mut state = self.lock();
            let chat = state
                .chats
                .iter()
                .find(|c| &c.id == chat_id)
                .cloned()
                .ok_or_else(|| ClientError::UnknownChat(chat_id.clone()))?;
            if !state.opening.insert(chat_id.clone()) {
                return Ok(None);
            }
            chat
        };

        let result = self.ctx.api.list_messages(chat_id).await;
        self.lock().opening.remove(chat_id);

        match result {
            Ok(messages) => {
                debug!(chat = %chat_id.short(), count = messages.len(), "Opening chat");
                let thread = ChatThread::new(chat, messages);
                Ok(Some(ChatDetailScreen::new(self.ctx.clone(), &self.session, thread)))
            }
            Err(e) if e.is_not_found() => {
                self.ctx.events.notice("No messages yet.");
                Ok(None)
            }
            Err(e) => {
                warn!(chat = %chat_id.short(), error = %e, "Failed to fetch messages");
                self.ctx
                    .events
                    .alert("Error", "Failed to load messages. Please try again.");
                Err(e)
            }
        }
    }

    /// Start a conversation with a friend.
    pub async fn create_chat(&self, friend: &UserId) -> Result<Option<Chat>> {
        let request = NewChat {
            id1: self.session.user_id().clone(),
            id2: friend.clone(),
        };

        match self.ctx.api.create_chat(&request).await {
            Ok(chat) => {
                info!(friend = %friend.short(), "Chat created");
                if let Some(chat) = &chat {
                    let mut state = self.lock();
                    if !state.chats.iter().any(|c| c.id == chat.id) {
                        state.chats.insert(0, chat.clone());
                    }
                }
                self.ctx.events.notice("Chat created.");
                Ok(chat)
            }
            Err(e) => {
                warn!(friend = %friend.short(), error = %e, "Error creating chat");
                self.ctx
                    .events
                    .alert("Error", "Failed to create chat. Please try again.");
                Err(e)
            }
        }
    }
}
