//! Screen-local state records.
//!
//! These wrap the server entities from `kinship_shared::models` with the
//! client-only state a screen keeps around them: optimistic like state,
//! comment visibility, per-item loading flags.

use serde::Serialize;

use kinship_shared::{Comment, Notification, Post};

// ---------------------------------------------------------------------------
// Load state
// ---------------------------------------------------------------------------

/// Progress of a screen's focus refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "camelCase")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The refresh failed; the message is what the error view shows.
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

/// The like flag and count of a post, as displayed or as confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub liked: bool,
    pub count: i64,
}

impl LikeState {
    /// Flip the flag and move the count by one in the matching direction.
    pub fn toggled(self) -> Self {
        let liked = !self.liked;
        Self {
            liked,
            count: if liked { self.count + 1 } else { self.count - 1 },
        }
    }
}

// ---------------------------------------------------------------------------
// Post entry
// ---------------------------------------------------------------------------

/// A loaded post plus its local like state.
///
/// `post.likes_count` is always the displayed count. `confirmed` is the last
/// state the server acknowledged, which is what a failed toggle reverts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    pub post: Post,
    pub liked: bool,
    pub(crate) confirmed: LikeState,
    pub(crate) confirmed_seq: u64,
}

impl PostEntry {
    pub(crate) fn new(post: Post, liked: bool) -> Self {
        let confirmed = LikeState {
            liked,
            count: post.likes_count,
        };
        Self {
            post,
            liked,
            confirmed,
            confirmed_seq: 0,
        }
    }

    /// Rebuild an entry from a fresh server listing.
    ///
    /// The listed count becomes the confirmed base and only acknowledgements
    /// newer than `barrier` may move it again. With a toggle still `pending`,
    /// the confirmed flag is kept and the toggle is shown on top of the base.
    pub(crate) fn refreshed(post: Post, previous: &PostEntry, pending: bool, barrier: u64) -> Self {
        let liked = if pending {
            previous.confirmed.liked
        } else {
            previous.liked
        };
        let confirmed = LikeState {
            liked,
            count: post.likes_count,
        };
        let mut entry = Self {
            post,
            liked,
            confirmed,
            confirmed_seq: barrier.max(previous.confirmed_seq),
        };
        if pending && previous.liked != liked {
            entry.show(confirmed.toggled());
        }
        entry
    }

    /// What the post card shows right now.
    pub fn displayed(&self) -> LikeState {
        LikeState {
            liked: self.liked,
            count: self.post.likes_count,
        }
    }

    pub fn confirmed(&self) -> LikeState {
        self.confirmed
    }

    pub(crate) fn show(&mut self, state: LikeState) {
        self.liked = state.liked;
        self.post.likes_count = state.count;
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Cached comments of one post and whether they are expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentThread {
    pub visible: bool,
    /// A fetch for this thread is on its way.
    pub loading: bool,
    pub comments: Vec<Comment>,
}

/// What a comment-visibility toggle needs from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentToggle {
    /// Nothing usable is cached: fetch, then call `put_comments`.
    Fetch,
    /// The cached thread was expanded without a fetch.
    Shown,
    /// The thread was collapsed.
    Hidden,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// A pending friend request and whether a decision is in flight for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEntry {
    pub notification: Notification,
    pub loading: bool,
}
