//! Pending friend requests and their per-item decision state.

use tracing::debug;

use kinship_shared::{Notification, NotificationId};

use crate::error::{Result, StoreError};
use crate::models::NotificationEntry;

#[derive(Debug, Clone, Default)]
pub struct NotificationList {
    entries: Vec<NotificationEntry>,
}

impl NotificationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the notifications carried on the signed-in user.
    pub fn replace_all(&mut self, notifications: Vec<Notification>) {
        let mut entries: Vec<NotificationEntry> = Vec::with_capacity(notifications.len());
        for notification in notifications {
            if entries.iter().any(|e| e.notification.id == notification.id) {
                continue;
            }
            // A decision already in flight keeps its spinner across a reseed.
            let loading = self.find(&notification.id).is_some_and(|e| e.loading);
            entries.push(NotificationEntry {
                notification,
                loading,
            });
        }
        self.entries = entries;
    }

    pub fn iter(&self) -> impl Iterator<Item = &NotificationEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &NotificationId) -> Option<&NotificationEntry> {
        self.find(id)
    }

    /// Mark a decision as in flight. Only one decision per notification may
    /// be pending at a time.
    pub fn begin(&mut self, id: &NotificationId) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| &e.notification.id == id)
            .ok_or_else(|| StoreError::UnknownNotification(id.clone()))?;
        if entry.loading {
            return Err(StoreError::NotificationBusy(id.clone()));
        }
        entry.loading = true;
        Ok(())
    }

    /// Finish a decision. The loading flag is always cleared; the entry is
    /// removed only when the server accepted the decision.
    ///
    /// Returns `true` if the entry was removed.
    pub fn finish(&mut self, id: &NotificationId, accepted_by_server: bool) -> bool {
        let Some(pos) = self.entries.iter().position(|e| &e.notification.id == id) else {
            return false;
        };
        if accepted_by_server {
            self.entries.remove(pos);
            debug!(notification = %id.short(), "Notification resolved");
            true
        } else {
            self.entries[pos].loading = false;
            false
        }
    }

    fn find(&self, id: &NotificationId) -> Option<&NotificationEntry> {
        self.entries.iter().find(|e| &e.notification.id == id)
    }
}
