//! Client configuration loaded from environment variables.
//!
//! Every setting has a default so the client can talk to a local development
//! server with zero configuration.

use kinship_shared::constants::{APP_NAME, DEFAULT_API_ROUTE, DEFAULT_HOST, MAX_UPLOAD_SIZE};
use kinship_shared::MediaResolver;
use url::Url;

use crate::error::{ClientError, Result};

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and authority of the API server. Media paths resolve against it.
    /// Env: `KINSHIP_HOST`
    /// Default: `http://127.0.0.1:3000`
    pub host: String,

    /// Path prefix of every API route.
    /// Env: `KINSHIP_API_ROUTE`
    /// Default: `/api/v1`
    pub api_route: String,

    /// Largest single file accepted for upload, in bytes.
    /// Env: `KINSHIP_MAX_UPLOAD_BYTES`
    /// Default: 50 MiB
    pub max_upload_bytes: usize,

    /// Env: `KINSHIP_USER_AGENT`
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_route: DEFAULT_API_ROUTE.to_string(),
            max_upload_bytes: MAX_UPLOAD_SIZE,
            user_agent: format!("{}/{}", APP_NAME.to_lowercase(), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("KINSHIP_HOST") {
            let host = host.trim().trim_end_matches('/').to_string();
            if MediaResolver::new(&host).is_ok() {
                config.host = host;
            } else {
                tracing::warn!(value = %host, "Invalid KINSHIP_HOST, using default");
            }
        }

        if let Some(route) = lookup("KINSHIP_API_ROUTE") {
            config.api_route = normalize_route(&route);
        }

        if let Some(val) = lookup("KINSHIP_MAX_UPLOAD_BYTES") {
            match val.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_upload_bytes = n,
                _ => tracing::warn!(value = %val, "Invalid KINSHIP_MAX_UPLOAD_BYTES, using default"),
            }
        }

        if let Some(agent) = lookup("KINSHIP_USER_AGENT") {
            if !agent.trim().is_empty() {
                config.user_agent = agent;
            }
        }

        // RUST_LOG is read by the EnvFilter in `init_logging`.

        config
    }

    /// Full URL of an API route, e.g. `endpoint(["posts", "recent"])`.
    ///
    /// Each segment is percent-encoded on its own, so an id containing `/`,
    /// `?` or `#` stays a single path segment.
    pub fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let base = format!("{}{}", self.host, self.api_route);
        let mut url = Url::parse(&base).map_err(|e| ClientError::Config(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::Config(format!("{base} cannot carry a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn media_resolver(&self) -> Result<MediaResolver> {
        MediaResolver::new(&self.host).map_err(|e| ClientError::Config(e.to_string()))
    }
}

/// `api/v1/` and `/api/v1` both become `/api/v1`; blank means no prefix.
fn normalize_route(route: &str) -> String {
    let trimmed = route.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(pairs: &[(&str, &str)]) -> ClientConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "http://127.0.0.1:3000");
        assert_eq!(config.api_route, "/api/v1");
        assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(
            config.endpoint(["posts", "recent"]).unwrap().as_str(),
            "http://127.0.0.1:3000/api/v1/posts/recent"
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = from_map(&[
            ("KINSHIP_HOST", "http://10.0.2.2:3000/"),
            ("KINSHIP_API_ROUTE", "api/v2/"),
            ("KINSHIP_MAX_UPLOAD_BYTES", "1024"),
        ]);
        assert_eq!(config.host, "http://10.0.2.2:3000");
        assert_eq!(config.api_route, "/api/v2");
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = from_map(&[
            ("KINSHIP_HOST", "not a url"),
            ("KINSHIP_MAX_UPLOAD_BYTES", "lots"),
        ]);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_blank_route_means_no_prefix() {
        let config = from_map(&[("KINSHIP_API_ROUTE", "  ")]);
        assert_eq!(
            config.endpoint(["chats"]).unwrap().as_str(),
            "http://127.0.0.1:3000/chats"
        );
    }

    #[test]
    fn test_endpoint_encodes_each_segment() {
        let config = ClientConfig::default();
        let url = config.endpoint(["posts", "a/b?c#d"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/api/v1/posts/a%2Fb%3Fc%23d");
        assert_eq!(url.path_segments().unwrap().count(), 4);
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }
}
