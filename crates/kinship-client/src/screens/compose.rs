use tracing::{info, warn};

use crate::api::{check_upload_sizes, PostDraft, Upload};
use crate::error::{ClientError, Result};
use crate::state::AppContext;

/// The "create post" form.
pub struct ComposeScreen {
    ctx: AppContext,
}

impl ComposeScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Publish a post. Refresh the feed that should show it afterwards.
    pub async fn submit(&self, content: &str, media: Vec<Upload>) -> Result<()> {
        let content = content.trim();
        if content.is_empty() && media.is_empty() {
            return Err(ClientError::EmptyPost);
        }
        check_upload_sizes(&media, self.ctx.max_upload_bytes)?;

        let draft = PostDraft {
            content: content.to_string(),
            media,
        };
        if let Err(e) = self.ctx.api.create_post(&draft).await {
            warn!(error = %e, "Error creating post");
            self.ctx
                .events
                .alert("Error", "Failed to create post. Please try again.");
            return Err(e);
        }

        info!(media = draft.media.len(), "Post created");
        self.ctx.events.notice("Post created!");
        Ok(())
    }
}
