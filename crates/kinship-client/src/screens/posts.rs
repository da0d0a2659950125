//! Post list screens: home (recent), my posts and shared posts.
//!
//! All three render the same cards and support the same actions, so one
//! controller serves them, parameterised by [`Feed`].

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use kinship_shared::constants::UNKNOWN_AUTHOR;
use kinship_shared::protocol::PostUpdate;
use kinship_shared::{Comment, Feed, MediaView, PostId};
use kinship_store::{
    CommentToggle, LikeResponse, LikeSettlement, LoadState, PostStore, StoreError,
};

use crate::error::Result;
use crate::state::AppContext;

/// Everything a post card draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: PostId,
    pub author: String,
    pub content: String,
    pub media: MediaView,
    pub liked: bool,
    pub likes_count: i64,
    pub is_shared: bool,
    pub comments_visible: bool,
    pub comments_loading: bool,
    pub comments: Vec<Comment>,
    pub draft: String,
}

#[derive(Debug, Default)]
struct PostListState {
    store: PostStore,
    load: LoadState,
}

pub struct PostListScreen {
    ctx: AppContext,
    feed: Feed,
    state: Mutex<PostListState>,
}

impl PostListScreen {
    pub fn new(ctx: AppContext, feed: Feed) -> Self {
        Self {
            ctx,
            feed,
            state: Mutex::new(PostListState::default()),
        }
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    fn lock(&self) -> MutexGuard<'_, PostListState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn load_state(&self) -> LoadState {
        self.lock().load.clone()
    }

    /// Refresh the list from the server. Called every time the screen gains
    /// focus; local like flags, open comments and drafts survive for posts
    /// that are still listed.
    pub async fn focus(&self) -> Result<()> {
        self.lock().load = LoadState::Loading;

        match self.ctx.api.list_posts(&self.feed).await {
            Ok(posts) => {
                let mut state = self.lock();
                state.store.replace_all(posts);
                state.load = LoadState::Ready;
                debug!(feed = %self.feed, count = state.store.len(), "Feed loaded");
                Ok(())
            }
            Err(e) => {
                warn!(feed = %self.feed, error = %e, "Failed to fetch posts");
                self.lock().load = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Cards in display order.
    pub fn cards(&self) -> Vec<PostCard> {
        let state = self.lock();
        state
            .store
            .iter()
            .map(|entry| {
                let id = &entry.post.id;
                let thread = state.store.comment_thread(id);
                PostCard {
                    id: id.clone(),
                    author: entry
                        .post
                        .posted_by
                        .as_ref()
                        .map(|u| u.username.clone())
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                    content: entry.post.content.clone(),
                    media: self.ctx.media.media_view(&entry.post.media_files),
                    liked: entry.liked,
                    likes_count: entry.post.likes_count,
                    is_shared: entry.post.is_shared,
                    comments_visible: thread.is_some_and(|t| t.visible),
                    comments_loading: thread.is_some_and(|t| t.loading),
                    comments: thread.map(|t| t.comments.clone()).unwrap_or_default(),
                    draft: state.store.draft(id).to_string(),
                }
            })
            .collect()
    }

    pub fn card(&self, id: &PostId) -> Option<PostCard> {
        self.cards().into_iter().find(|c| &c.id == id)
    }

    // ------------------------------------------------------------------
    // Likes
    // ------------------------------------------------------------------

    /// Flip the like immediately, then confirm with the server.
    ///
    /// On failure the card returns to its last confirmed state and an alert
    /// is raised. A response that lands after a newer toggle on the same
    /// post never changes what is displayed.
    pub async fn toggle_like(&self, id: &PostId) -> Result<LikeSettlement> {
        let ticket = self.lock().store.begin_like(id)?;
        let update = PostUpdate::like(ticket.liked());

        let response = match self.ctx.api.update_post(id, &update).await {
            Ok(post) => LikeResponse::Confirmed(post),
            Err(e) => {
                warn!(post = %id.short(), error = %e, "Error updating like status");
                LikeResponse::Failed
            }
        };

        let settlement = self.lock().store.settle_like(ticket, response);
        if settlement == LikeSettlement::RolledBack {
            self.ctx
                .events
                .alert("Error", "Error updating like status. Please try again.");
        }
        Ok(settlement)
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Expand or collapse a post's comments, fetching them on first expand.
    ///
    /// Taps while that fetch is out just collapse or expand the loading
    /// thread; they never start a second fetch.
    pub async fn toggle_comments(&self, id: &PostId) -> Result<CommentToggle> {
        let toggle = self.lock().store.toggle_comments(id)?;
        if toggle == CommentToggle::Fetch {
            let comments = self.fetch_comments(id).await;
            self.lock().store.finish_comment_fetch(id, comments);
        }
        Ok(toggle)
    }

    pub fn set_comment_draft(&self, id: &PostId, text: impl Into<String>) {
        self.lock().store.set_draft(id, text);
    }

    /// Post the draft comment, then reload and expand the post's comments.
    pub async fn submit_comment(&self, id: &PostId) -> Result<()> {
        let content = match self.lock().store.comment_to_send(id) {
            Ok(text) => text,
            Err(e @ StoreError::EmptyComment) => {
                self.ctx.events.alert("Error", "Comment cannot be empty.");
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = self.ctx.api.add_comment(id, &content).await {
            warn!(post = %id.short(), error = %e, "Error adding comment");
            self.ctx
                .events
                .alert("Error", "Failed to add comment. Please try again.");
            return Err(e);
        }

        let comments = self.fetch_comments(id).await;
        let mut state = self.lock();
        state.store.put_comments(id, comments);
        state.store.clear_draft(id);
        Ok(())
    }

    /// A failed fetch shows as an empty thread.
    async fn fetch_comments(&self, id: &PostId) -> Vec<Comment> {
        match self.ctx.api.list_comments(id).await {
            Ok(comments) => comments,
            Err(e) => {
                warn!(post = %id.short(), error = %e, "Error fetching comments");
                Vec::new()
            }
        }
    }

    // ------------------------------------------------------------------
    // Share
    // ------------------------------------------------------------------

    pub async fn share(&self, id: &PostId) -> Result<()> {
        if !self.lock().store.contains(id) {
            return Err(StoreError::UnknownPost(id.clone()).into());
        }

        match self.ctx.api.update_post(id, &PostUpdate::share()).await {
            Ok(Some(post)) => {
                self.lock().store.apply_server_post(post);
                info!(post = %id.short(), "Post shared");
                self.ctx.events.notice("Post shared successfully!");
                Ok(())
            }
            Ok(None) => {
                warn!(post = %id.short(), "Share accepted without the updated post");
                self.ctx.events.notice("Post shared successfully!");
                Ok(())
            }
            Err(e) => {
                warn!(post = %id.short(), error = %e, "Error sharing post");
                self.ctx
                    .events
                    .alert("Error", "Failed to share post. Please try again.");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{alerts, comment, context, context_with_events, drain, post, FakeApi};
    use crate::error::ClientError;
    use crate::events::UiEvent;

    async fn home(api: &std::sync::Arc<FakeApi>, likes: i64) -> PostListScreen {
        api.script(|s| {
            s.posts.insert("recent".into(), vec![post("p1", likes, &[]), post("p2", 0, &["/uploads/a.jpg"])]);
        });
        let screen = PostListScreen::new(context(api.clone()), Feed::Recent);
        screen.focus().await.unwrap();
        screen
    }

    fn p1() -> PostId {
        PostId::from("p1")
    }

    #[tokio::test]
    async fn test_focus_loads_cards_with_media_view() {
        let api = FakeApi::new();
        let screen = home(&api, 3).await;

        assert_eq!(screen.load_state(), LoadState::Ready);
        let cards = screen.cards();
        assert_eq!(cards.len(), 2);
        assert!(cards[0].media.is_placeholder());
        match &cards[1].media {
            MediaView::Images(urls) => assert_eq!(urls[0].as_str(), "http://media.test/uploads/a.jpg"),
            other => panic!("expected images, got {other:?}"),
        }
        assert_eq!(cards[0].author, "author");
    }

    #[tokio::test]
    async fn test_focus_failure_sets_error_state() {
        let api = FakeApi::new();
        api.fail("list_posts");
        let screen = PostListScreen::new(context(api.clone()), Feed::Mine);

        assert!(screen.focus().await.is_err());
        assert!(screen.load_state().error().is_some());
        assert_eq!(api.calls_to("list_posts")[0]["feed"], "mine");
    }

    #[tokio::test]
    async fn test_like_then_unlike_returns_to_original_count() {
        let api = FakeApi::new();
        let screen = home(&api, 5).await;

        screen.toggle_like(&p1()).await.unwrap();
        let card = screen.card(&p1()).unwrap();
        assert!(card.liked);
        assert_eq!(card.likes_count, 6);

        screen.toggle_like(&p1()).await.unwrap();
        let card = screen.card(&p1()).unwrap();
        assert!(!card.liked);
        assert_eq!(card.likes_count, 5);

        let calls = api.calls_to("update_post");
        assert_eq!(calls[0]["like"], true);
        assert_eq!(calls[1]["like"], false);
    }

    #[tokio::test]
    async fn test_failed_like_reverts_and_alerts_once() {
        let api = FakeApi::new();
        api.script(|s| {
            s.posts.insert("recent".into(), vec![post("p1", 5, &[])]);
        });
        let (ctx, mut rx) = context_with_events(api.clone());
        let screen = PostListScreen::new(ctx, Feed::Recent);
        screen.focus().await.unwrap();
        api.fail("update_post");

        let settled = screen.toggle_like(&p1()).await.unwrap();
        assert_eq!(settled, LikeSettlement::RolledBack);

        let card = screen.card(&p1()).unwrap();
        assert!(!card.liked);
        assert_eq!(card.likes_count, 5);
        assert_eq!(alerts(&drain(&mut rx)), 1);
    }

    #[tokio::test]
    async fn test_like_unknown_post_makes_no_call() {
        let api = FakeApi::new();
        let screen = home(&api, 0).await;

        let err = screen.toggle_like(&PostId::from("gone")).await.unwrap_err();
        assert!(matches!(err, ClientError::Store(StoreError::UnknownPost(_))));
        assert_eq!(api.count("update_post"), 0);
    }

    #[tokio::test]
    async fn test_server_echo_wins_on_like() {
        let api = FakeApi::new();
        let screen = home(&api, 5).await;
        api.script(|s| s.post_echo = Some(post("p1", 42, &[])));

        screen.toggle_like(&p1()).await.unwrap();
        assert_eq!(screen.card(&p1()).unwrap().likes_count, 42);
    }

    #[tokio::test]
    async fn test_like_state_survives_refresh() {
        let api = FakeApi::new();
        let screen = home(&api, 5).await;
        screen.toggle_like(&p1()).await.unwrap();

        screen.focus().await.unwrap();
        assert!(screen.card(&p1()).unwrap().liked);
    }

    #[tokio::test]
    async fn test_comment_toggle_fetches_once() {
        let api = FakeApi::new();
        api.script(|s| {
            s.comments.insert(p1(), vec![comment("c1", "first!")]);
        });
        let screen = home(&api, 0).await;

        assert_eq!(screen.toggle_comments(&p1()).await.unwrap(), CommentToggle::Fetch);
        assert_eq!(api.count("list_comments"), 1);
        assert_eq!(screen.card(&p1()).unwrap().comments.len(), 1);

        assert_eq!(screen.toggle_comments(&p1()).await.unwrap(), CommentToggle::Hidden);
        assert_eq!(screen.toggle_comments(&p1()).await.unwrap(), CommentToggle::Shown);
        assert_eq!(api.count("list_comments"), 1);
    }

    #[tokio::test]
    async fn test_second_tap_during_fetch_collapses_without_refetch() {
        let api = FakeApi::new();
        api.script(|s| {
            s.comments.insert(p1(), vec![comment("c1", "first!")]);
        });
        let screen = home(&api, 0).await;

        let id = p1();
        let (first, second) =
            tokio::join!(screen.toggle_comments(&id), screen.toggle_comments(&id));
        assert_eq!(first.unwrap(), CommentToggle::Fetch);
        assert_eq!(second.unwrap(), CommentToggle::Hidden);
        assert_eq!(api.count("list_comments"), 1);

        let card = screen.card(&p1()).unwrap();
        assert!(!card.comments_visible);
        assert!(!card.comments_loading);
        assert_eq!(card.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_comment_fetch_failure_shows_empty_thread() {
        let api = FakeApi::new();
        let screen = home(&api, 0).await;
        api.fail("list_comments");

        screen.toggle_comments(&p1()).await.unwrap();
        let card = screen.card(&p1()).unwrap();
        assert!(card.comments_visible);
        assert!(card.comments.is_empty());
    }

    #[tokio::test]
    async fn test_blank_comment_makes_no_call() {
        let api = FakeApi::new();
        let (ctx, mut rx) = context_with_events(api.clone());
        api.script(|s| {
            s.posts.insert("recent".into(), vec![post("p1", 0, &[])]);
        });
        let screen = PostListScreen::new(ctx, Feed::Recent);
        screen.focus().await.unwrap();

        screen.set_comment_draft(&p1(), "   ");
        let err = screen.submit_comment(&p1()).await.unwrap_err();
        assert!(matches!(err, ClientError::Store(StoreError::EmptyComment)));
        assert_eq!(api.count("add_comment"), 0);
        assert_eq!(api.count("list_comments"), 0);
        assert!(!screen.card(&p1()).unwrap().comments_visible);
        assert_eq!(alerts(&drain(&mut rx)), 1);
    }

    #[tokio::test]
    async fn test_submit_comment_refetches_and_clears_draft() {
        let api = FakeApi::new();
        let screen = home(&api, 0).await;
        api.script(|s| {
            s.comments.insert(p1(), vec![comment("c1", "nice")]);
        });

        screen.set_comment_draft(&p1(), "  nice  ");
        screen.submit_comment(&p1()).await.unwrap();

        assert_eq!(api.calls_to("add_comment")[0]["content"], "nice");
        let card = screen.card(&p1()).unwrap();
        assert!(card.comments_visible);
        assert_eq!(card.comments[0].content, "nice");
        assert_eq!(card.draft, "");
    }

    #[tokio::test]
    async fn test_failed_comment_keeps_draft() {
        let api = FakeApi::new();
        let screen = home(&api, 0).await;
        api.fail("add_comment");

        screen.set_comment_draft(&p1(), "hello");
        assert!(screen.submit_comment(&p1()).await.is_err());
        assert_eq!(screen.card(&p1()).unwrap().draft, "hello");
    }

    #[tokio::test]
    async fn test_share_adopts_server_post() {
        let api = FakeApi::new();
        let (ctx, mut rx) = context_with_events(api.clone());
        api.script(|s| {
            s.posts.insert("recent".into(), vec![post("p1", 1, &[])]);
            let mut shared = post("p1", 1, &[]);
            shared.is_shared = true;
            s.post_echo = Some(shared);
        });
        let screen = PostListScreen::new(ctx, Feed::Recent);
        screen.focus().await.unwrap();

        screen.share(&p1()).await.unwrap();
        assert!(screen.card(&p1()).unwrap().is_shared);
        assert_eq!(api.calls_to("update_post")[0]["share"], true);
        assert!(matches!(drain(&mut rx).as_slice(), [UiEvent::Notice { .. }]));
    }

    #[tokio::test]
    async fn test_share_without_echo_keeps_local_post() {
        let api = FakeApi::new();
        let screen = home(&api, 1).await;

        screen.share(&p1()).await.unwrap();
        assert!(!screen.card(&p1()).unwrap().is_shared);
    }
}
