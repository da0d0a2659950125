//! Dependencies shared by every screen controller.
//!
//! An [`AppContext`] is cheap to clone; each screen keeps its own copy and
//! its own screen-local state. Nothing in here is mutated after start-up.

use std::sync::Arc;

use kinship_shared::MediaResolver;

use crate::api::{HttpApi, SocialApi};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::events::EventSink;

#[derive(Clone)]
pub struct AppContext {
    /// Remote data source. [`HttpApi`] in production.
    pub api: Arc<dyn SocialApi>,

    /// Resolves relative media paths against the API host.
    pub media: MediaResolver,

    /// Alerts and notices for the UI layer.
    pub events: EventSink,

    /// Largest single upload accepted, checked before any request is made.
    pub max_upload_bytes: usize,
}

impl AppContext {
    /// Production context: an [`HttpApi`] built from `config`.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let media = config.media_resolver()?;
        let max_upload_bytes = config.max_upload_bytes;
        let api = HttpApi::new(config)?;
        Ok(Self {
            api: Arc::new(api),
            media,
            events: EventSink::default(),
            max_upload_bytes,
        })
    }

    /// Context around any [`SocialApi`] implementation.
    pub fn with_api(api: Arc<dyn SocialApi>, host: &str, max_upload_bytes: usize) -> Result<Self> {
        let media = MediaResolver::new(host).map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(Self {
            api,
            media,
            events: EventSink::default(),
            max_upload_bytes,
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("media", &self.media.base().as_str())
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish_non_exhaustive()
    }
}
