//! User search and friend requests.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use kinship_shared::{User, UserId};
use kinship_store::{FlightSlots, LoadState};

use crate::error::Result;
use crate::state::AppContext;

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    results: Vec<User>,
    load: LoadState,
    requested: HashSet<UserId>,
    /// Only the latest query may replace the results.
    queries: FlightSlots<()>,
}

pub struct SearchScreen {
    ctx: AppContext,
    state: Mutex<SearchState>,
}

impl SearchScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(SearchState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn query(&self) -> String {
        self.lock().query.clone()
    }

    pub fn results(&self) -> Vec<User> {
        self.lock().results.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.lock().load.clone()
    }

    /// Whether a friend request was sent to `id` from this screen.
    pub fn request_sent(&self, id: &UserId) -> bool {
        self.lock().requested.contains(id)
    }

    /// Run a search. A blank query clears the results without a request.
    ///
    /// Returns `false` when a newer search finished first and this one's
    /// results were dropped.
    pub async fn search(&self, query: &str) -> Result<bool> {
        let trimmed = query.trim().to_string();
        let seq = {
            let mut state = self.lock();
            state.query = query.to_string();
            let seq = state.queries.begin(&());
            if trimmed.is_empty() {
                state.queries.land(&(), seq);
                state.results.clear();
                state.load = LoadState::Idle;
                return Ok(true);
            }
            state.load = LoadState::Loading;
            seq
        };

        let result = self.ctx.api.search_users(&trimmed).await;

        let mut state = self.lock();
        if !state.queries.land(&(), seq) {
            debug!(query = %trimmed, "Dropping results of a superseded search");
            return Ok(false);
        }
        match result {
            Ok(users) => {
                state.results = users;
                state.load = LoadState::Ready;
                Ok(true)
            }
            Err(e) => {
                warn!(query = %trimmed, error = %e, "Error fetching users");
                state.results.clear();
                state.load = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn send_friend_request(&self, to: &UserId) -> Result<()> {
        if let Err(e) = self.ctx.api.send_friend_request(to).await {
            warn!(to = %to.short(), error = %e, "Error sending friend request");
            self.ctx
                .events
                .alert("Error", "Failed to send friend request. Please try again.");
            return Err(e);
        }
        self.lock().requested.insert(to.clone());
        info!(to = %to.short(), "Friend request sent");
        self.ctx.events.notice("Friend request sent!");
        Ok(())
    }
}
