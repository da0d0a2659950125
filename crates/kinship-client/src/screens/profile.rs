//! The signed-in user's profile: header, own posts and the edit form.

use std::sync::{Mutex, MutexGuard};

use tracing::{info, warn};
use url::Url;

use kinship_shared::{Feed, User};
use kinship_store::LoadState;

use super::posts::PostListScreen;
use crate::api::{check_upload_sizes, ProfileUpdate};
use crate::error::Result;
use crate::session::Session;
use crate::state::AppContext;

#[derive(Debug, Default)]
struct ProfileState {
    user: Option<User>,
    load: LoadState,
}

pub struct ProfileScreen {
    ctx: AppContext,
    state: Mutex<ProfileState>,
    posts: PostListScreen,
}

impl ProfileScreen {
    pub fn new(ctx: AppContext, session: &Session) -> Self {
        let posts = PostListScreen::new(ctx.clone(), Feed::Mine);
        Self {
            ctx,
            state: Mutex::new(ProfileState {
                user: Some(session.user().clone()),
                load: LoadState::Idle,
            }),
            posts,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProfileState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.lock().load.clone()
    }

    /// The user's own posts, with the usual like, comment and share actions.
    pub fn posts(&self) -> &PostListScreen {
        &self.posts
    }

    /// Absolute URL of the avatar, if the user has one.
    pub fn avatar_url(&self) -> Option<Url> {
        let path = self.lock().user.as_ref()?.profile_picture.clone()?;
        match self.ctx.media.resolve(&path) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, "Unusable profile picture path");
                None
            }
        }
    }

    /// Reload the user record and the user's posts concurrently.
    pub async fn focus(&self) -> Result<()> {
        self.lock().load = LoadState::Loading;

        let (me, posts) = tokio::join!(self.ctx.api.me(), self.posts.focus());

        let mut state = self.lock();
        match me {
            Ok(user) => {
                state.user = Some(user);
                state.load = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch profile");
                state.load = LoadState::Failed(e.to_string());
                return Err(e);
            }
        }
        posts
    }

    /// Submit the edit form, then reload the profile header.
    pub async fn update(&self, update: ProfileUpdate) -> Result<()> {
        check_upload_sizes(update.picture.iter(), self.ctx.max_upload_bytes)?;

        if let Err(e) = self.ctx.api.update_profile(&update).await {
            warn!(error = %e, "Error updating profile");
            self.ctx
                .events
                .alert("Error", "Failed to update profile. Please try again.");
            return Err(e);
        }
        info!(username = %update.username, "Profile updated");

        match self.ctx.api.me().await {
            Ok(user) => self.lock().user = Some(user),
            Err(e) => warn!(error = %e, "Profile updated but reload failed"),
        }
        Ok(())
    }
}
