//! Comment visibility and the per-post comment cache.

use tracing::debug;

use kinship_shared::{Comment, PostId};

use crate::error::{Result, StoreError};
use crate::models::{CommentThread, CommentToggle};
use crate::posts::PostStore;

impl PostStore {
    pub fn comment_thread(&self, id: &PostId) -> Option<&CommentThread> {
        self.comments.get(id)
    }

    pub fn comments_visible(&self, id: &PostId) -> bool {
        self.comments.get(id).is_some_and(|t| t.visible)
    }

    /// Expand or collapse a post's comments.
    ///
    /// Collapsing never fetches. Expanding reuses the cache unless there is
    /// no entry yet or the cached list is empty, in which case the thread is
    /// marked as loading and the caller is told to fetch and hand the result
    /// to [`PostStore::finish_comment_fetch`]. While that fetch is out, taps
    /// only collapse and expand the pending thread.
    pub fn toggle_comments(&mut self, id: &PostId) -> Result<CommentToggle> {
        if !self.entries.contains_key(id) {
            return Err(StoreError::UnknownPost(id.clone()));
        }

        let thread = self.comments.entry(id.clone()).or_default();
        if thread.visible {
            thread.visible = false;
            return Ok(CommentToggle::Hidden);
        }
        thread.visible = true;
        if thread.loading || !thread.comments.is_empty() {
            return Ok(CommentToggle::Shown);
        }
        thread.loading = true;
        Ok(CommentToggle::Fetch)
    }

    /// Fill a thread whose fetch was requested by
    /// [`PostStore::toggle_comments`], keeping whatever visibility the user
    /// chose while it loaded.
    pub fn finish_comment_fetch(&mut self, id: &PostId, comments: Vec<Comment>) {
        if !self.entries.contains_key(id) {
            debug!(post = %id.short(), "Dropping comments for a post no longer listed");
            return;
        }
        debug!(post = %id.short(), count = comments.len(), "Comment fetch landed");
        let thread = self.comments.entry(id.clone()).or_insert_with(|| CommentThread {
            visible: true,
            ..CommentThread::default()
        });
        thread.loading = false;
        thread.comments = comments;
    }

    /// Store a freshly fetched comment list and expand it.
    pub fn put_comments(&mut self, id: &PostId, comments: Vec<Comment>) {
        if !self.entries.contains_key(id) {
            debug!(post = %id.short(), "Dropping comments for a post no longer listed");
            return;
        }
        debug!(post = %id.short(), count = comments.len(), "Comment cache replaced");
        self.comments.insert(
            id.clone(),
            CommentThread {
                visible: true,
                loading: false,
                comments,
            },
        );
    }

    /// The trimmed draft for `id`, or an error when there is nothing to send.
    ///
    /// Does not mutate anything: an empty draft leaves the cache and the draft
    /// exactly as they were.
    pub fn comment_to_send(&self, id: &PostId) -> Result<String> {
        if !self.entries.contains_key(id) {
            return Err(StoreError::UnknownPost(id.clone()));
        }
        let text = self.draft(id).trim();
        if text.is_empty() {
            return Err(StoreError::EmptyComment);
        }
        Ok(text.to_string())
    }
}
