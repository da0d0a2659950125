//! Normalized post store for one post-listing screen.
//!
//! Posts are kept in a map keyed by id with a separate display order, so the
//! like and comment reducers (see `likes.rs` and `comments.rs`) address a post
//! by identifier instead of by list position.

use std::collections::HashMap;

use tracing::debug;

use kinship_shared::{Post, PostId};

use crate::flight::FlightSlots;
use crate::models::{CommentThread, PostEntry};

#[derive(Debug, Clone, Default)]
pub struct PostStore {
    pub(crate) order: Vec<PostId>,
    pub(crate) entries: HashMap<PostId, PostEntry>,
    pub(crate) like_flights: FlightSlots<PostId>,
    pub(crate) comments: HashMap<PostId, CommentThread>,
    pub(crate) drafts: HashMap<PostId, String>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with a fresh server listing.
    ///
    /// Local like flags, cached comments and drafts survive for posts that are
    /// still listed; everything belonging to vanished posts is dropped. The
    /// listed like counts become the rollback base, and a toggle still in
    /// flight stays displayed on top of it.
    pub fn replace_all(&mut self, posts: Vec<Post>) {
        let mut entries = HashMap::with_capacity(posts.len());
        let mut order = Vec::with_capacity(posts.len());
        let barrier = self.like_flights.high_water();

        for post in posts {
            if entries.contains_key(&post.id) {
                debug!(post = %post.id.short(), "Skipping duplicate post in listing");
                continue;
            }
            let entry = match self.entries.get(&post.id) {
                Some(previous) => {
                    let pending = self.like_flights.in_flight(&post.id);
                    PostEntry::refreshed(post, previous, pending, barrier)
                }
                None => PostEntry::new(post, false),
            };
            order.push(entry.post.id.clone());
            entries.insert(entry.post.id.clone(), entry);
        }

        self.comments.retain(|id, _| entries.contains_key(id));
        self.drafts.retain(|id, _| entries.contains_key(id));
        self.like_flights.retain(|id| entries.contains_key(id));
        self.order = order;
        self.entries = entries;

        debug!(count = self.order.len(), "Post list replaced");
    }

    /// Drop everything (screen unmounted).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &PostId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &PostId) -> Option<&PostEntry> {
        self.entries.get(id)
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &PostEntry> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Adopt a post entity returned by the server as the new truth.
    ///
    /// The displayed like count follows the server unless a like toggle is
    /// still in flight, in which case only the confirmed base moves and the
    /// pending toggle settles against it. Returns `false` for unknown posts.
    pub fn apply_server_post(&mut self, post: Post) -> bool {
        let in_flight = self.like_flights.in_flight(&post.id);
        let Some(entry) = self.entries.get_mut(&post.id) else {
            return false;
        };
        entry.confirmed.count = post.likes_count;
        if in_flight {
            let shown = entry.post.likes_count;
            entry.post = post;
            entry.post.likes_count = shown;
        } else {
            entry.post = post;
        }
        true
    }

    // ------------------------------------------------------------------
    // Drafts
    // ------------------------------------------------------------------

    pub fn set_draft(&mut self, id: &PostId, text: impl Into<String>) {
        self.drafts.insert(id.clone(), text.into());
    }

    pub fn draft(&self, id: &PostId) -> &str {
        self.drafts.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn clear_draft(&mut self, id: &PostId) {
        self.drafts.remove(id);
    }
}
