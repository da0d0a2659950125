use std::sync::{Mutex, MutexGuard};

use tracing::{info, warn};

use kinship_shared::{User, UserId};
use kinship_store::LoadState;

use crate::error::{ClientError, Result};
use crate::state::AppContext;

#[derive(Debug, Default)]
struct FriendsState {
    friends: Vec<User>,
    load: LoadState,
}

pub struct FriendsScreen {
    ctx: AppContext,
    state: Mutex<FriendsState>,
}

impl FriendsScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(FriendsState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FriendsState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn friends(&self) -> Vec<User> {
        self.lock().friends.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.lock().load.clone()
    }

    pub async fn focus(&self) -> Result<()> {
        self.lock().load = LoadState::Loading;
        match self.ctx.api.list_friends().await {
            Ok(friends) => {
                let mut state = self.lock();
                state.friends = friends;
                state.load = LoadState::Ready;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Error fetching friends");
                self.lock().load = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Unfriend. The local list only changes once the server agreed.
    pub async fn remove(&self, id: &UserId) -> Result<()> {
        if !self.lock().friends.iter().any(|f| &f.id == id) {
            return Err(ClientError::UnknownUser(id.clone()));
        }

        if let Err(e) = self.ctx.api.remove_friend(id).await {
            warn!(friend = %id.short(), error = %e, "Failed to remove friend");
            self.ctx
                .events
                .alert("Error", "Failed to remove friend. Please try again.");
            return Err(e);
        }

        self.lock().friends.retain(|f| &f.id != id);
        info!(friend = %id.short(), "Friend removed");
        self.ctx.events.notice("Friend removed.");
        Ok(())
    }
}
