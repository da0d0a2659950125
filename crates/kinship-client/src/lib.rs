//! # kinship-client
//!
//! Headless client for the Kinship social network API.
//!
//! Build an [`AppContext`] from a [`ClientConfig`], log in to get a
//! [`Session`], then drive the screen controllers in [`screens`]. Every
//! controller refreshes on `focus`, applies user actions optimistically
//! where the app did, and reports failures on the context's [`EventSink`].

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod screens;
pub mod session;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use api::{HttpApi, SocialApi};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use events::{EventSink, UiEvent};
pub use session::Session;
pub use state::AppContext;

const DEFAULT_LOG_FILTER: &str = "kinship_client=debug,kinship_store=info,warn";

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter. Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
