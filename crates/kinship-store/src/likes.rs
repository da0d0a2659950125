//! Optimistic like toggling.
//!
//! A toggle flips the displayed state immediately and hands out a
//! [`LikeTicket`]. The ticket is settled exactly once, by value, with the
//! outcome of the network call. Only the post's latest ticket may change what
//! is displayed; an older ticket can at most move the confirmed base forward.

use tracing::{debug, warn};

use kinship_shared::{Post, PostId};

use crate::error::{Result, StoreError};
use crate::models::LikeState;
use crate::posts::PostStore;

/// Proof of an optimistic like toggle awaiting its server response.
///
/// Deliberately not `Clone`: settling consumes it, so a rollback can never be
/// applied twice for the same toggle.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a like ticket must be settled with the server outcome"]
pub struct LikeTicket {
    post_id: PostId,
    seq: u64,
    target: LikeState,
}

impl LikeTicket {
    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    /// The flag the server is asked to store.
    pub fn liked(&self) -> bool {
        self.target.liked
    }
}

/// Server response to a like update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeResponse {
    /// Accepted. Carries the updated post when the server echoed it.
    Confirmed(Option<Post>),
    Failed,
}

/// What settling a ticket did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeSettlement {
    /// The optimistic state is now the confirmed state.
    Committed,
    /// The toggle failed and the display went back to the confirmed state.
    RolledBack,
    /// A newer toggle owns the display; this response was not shown.
    Superseded,
    /// The post left the list while the request was in flight.
    Dropped,
}

impl PostStore {
    /// Apply a like toggle optimistically.
    pub fn begin_like(&mut self, id: &PostId) -> Result<LikeTicket> {
        let Some(entry) = self.entries.get_mut(id) else {
            warn!(post = %id.short(), "Like toggle for a post that is not loaded");
            return Err(StoreError::UnknownPost(id.clone()));
        };

        let target = entry.displayed().toggled();
        entry.show(target);
        let seq = self.like_flights.begin(id);

        debug!(
            post = %id.short(),
            seq,
            liked = target.liked,
            count = target.count,
            "Optimistic like applied"
        );

        Ok(LikeTicket {
            post_id: id.clone(),
            seq,
            target,
        })
    }

    /// Settle a toggle with the server's answer.
    pub fn settle_like(&mut self, ticket: LikeTicket, response: LikeResponse) -> LikeSettlement {
        let LikeTicket {
            post_id,
            seq,
            target,
        } = ticket;

        let live = self.like_flights.land(&post_id, seq);
        let Some(entry) = self.entries.get_mut(&post_id) else {
            debug!(post = %post_id.short(), seq, "Like settled for a post no longer listed");
            return LikeSettlement::Dropped;
        };

        match (live, response) {
            (true, LikeResponse::Confirmed(server_post)) => {
                let mut confirmed = target;
                if let Some(server) = server_post.filter(|p| p.id == post_id) {
                    confirmed.count = server.likes_count;
                    entry.post = server;
                }
                entry.show(confirmed);
                entry.confirmed = confirmed;
                entry.confirmed_seq = seq;
                LikeSettlement::Committed
            }
            (true, LikeResponse::Failed) => {
                let confirmed = entry.confirmed;
                entry.show(confirmed);
                debug!(
                    post = %post_id.short(),
                    seq,
                    liked = confirmed.liked,
                    count = confirmed.count,
                    "Like rolled back"
                );
                LikeSettlement::RolledBack
            }
            (false, LikeResponse::Confirmed(server_post)) => {
                // The server did store this older toggle, so it becomes the
                // rollback base for the live one, unless a later toggle was
                // already confirmed.
                if seq > entry.confirmed_seq {
                    let mut confirmed = target;
                    if let Some(server) = server_post.filter(|p| p.id == post_id) {
                        confirmed.count = server.likes_count;
                    }
                    entry.confirmed = confirmed;
                    entry.confirmed_seq = seq;
                }
                LikeSettlement::Superseded
            }
            (false, LikeResponse::Failed) => LikeSettlement::Superseded,
        }
    }
}
