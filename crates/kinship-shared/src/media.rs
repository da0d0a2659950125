//! Media path resolution.
//!
//! The server returns upload locations relative to its own origin
//! (`/uploads/169...jpg`, sometimes with Windows separators). The client
//! resolves them against the configured host before handing them to a view.

use url::Url;

use crate::error::MediaError;

/// Resolves relative media paths against a fixed base host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResolver {
    base: Url,
}

impl MediaResolver {
    /// `host` is scheme + authority, e.g. `http://10.0.2.2:3000`.
    pub fn new(host: &str) -> Result<Self, MediaError> {
        let base = Url::parse(host).map_err(|e| MediaError::InvalidHost(format!("{host}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(MediaError::InvalidHost(host.to_string()));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve a single path. Absolute URLs pass through untouched.
    pub fn resolve(&self, path: &str) -> Result<Url, MediaError> {
        let normalized = path.trim().replace('\\', "/");
        if normalized.is_empty() {
            return Err(MediaError::InvalidPath {
                path: path.to_string(),
                reason: "empty path".to_string(),
            });
        }
        let rooted = if normalized.contains("://") || normalized.starts_with('/') {
            normalized
        } else {
            format!("/{normalized}")
        };
        self.base
            .join(&rooted)
            .map_err(|e| MediaError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    /// Build the media strip for a post: resolved images, or the placeholder
    /// when there is nothing to show. Unresolvable entries are dropped.
    pub fn media_view(&self, paths: &[String]) -> MediaView {
        let urls: Vec<Url> = paths.iter().filter_map(|p| self.resolve(p).ok()).collect();
        if urls.is_empty() {
            MediaView::Placeholder
        } else {
            MediaView::Images(urls)
        }
    }
}

/// What a post card shows in its media area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaView {
    /// "No images for this post."
    Placeholder,
    /// A horizontal strip of images, in server order.
    Images(Vec<Url>),
}

impl MediaView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, MediaView::Placeholder)
    }
}
