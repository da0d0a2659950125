use std::sync::{Mutex, MutexGuard};

use tracing::{info, warn};

use kinship_shared::NotificationId;
use kinship_store::{NotificationEntry, NotificationList};

use crate::error::Result;
use crate::session::Session;
use crate::state::AppContext;

/// Pending friend requests with accept / reject actions.
pub struct NotificationsScreen {
    ctx: AppContext,
    list: Mutex<NotificationList>,
}

impl NotificationsScreen {
    /// Seeded from the notifications that came with the signed-in user.
    pub fn new(ctx: AppContext, session: &Session) -> Self {
        let mut list = NotificationList::new();
        list.replace_all(session.notifications().to_vec());
        Self {
            ctx,
            list: Mutex::new(list),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NotificationList> {
        self.list.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn entries(&self) -> Vec<NotificationEntry> {
        self.lock().iter().cloned().collect()
    }

    /// Re-read pending requests from `/users/me`.
    pub async fn refresh(&self) -> Result<()> {
        let user = self.ctx.api.me().await.map_err(|e| {
            warn!(error = %e, "Failed to refresh notifications");
            e
        })?;
        self.lock().replace_all(user.notifications);
        Ok(())
    }

    /// Accept or reject a friend request.
    ///
    /// Returns `true` when the request was resolved and removed. On failure
    /// the request stays listed, its loading flag cleared, and an alert is
    /// raised.
    pub async fn resolve(&self, id: &NotificationId, accept: bool) -> Result<bool> {
        self.lock().begin(id)?;

        let result = self.ctx.api.decide_friend_request(id, accept).await;
        let removed = self.lock().finish(id, result.is_ok());

        match result {
            Ok(()) => {
                info!(notification = %id.short(), accept, "Friend request resolved");
                Ok(removed)
            }
            Err(e) => {
                warn!(notification = %id.short(), error = %e, "Failed to resolve friend request");
                self.ctx
                    .events
                    .alert("Error", "Something went wrong. Please try again.");
                Err(e)
            }
        }
    }
}
