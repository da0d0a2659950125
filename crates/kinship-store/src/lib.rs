//! # kinship-store
//!
//! In-memory, screen-local state for the Kinship client.
//!
//! Nothing here talks to the network. Screens hand server responses to these
//! reducers and read back what to render. The interesting part is the
//! optimistic like toggle in [`likes`], which relies on per-post
//! single-flight tokens from [`flight`] so that a late response can never
//! clobber a newer toggle.

pub mod chats;
pub mod comments;
pub mod flight;
pub mod likes;
pub mod models;
pub mod notifications;
pub mod posts;

mod error;

pub use chats::{ChatThread, Route};
pub use error::{Result, StoreError};
pub use flight::FlightSlots;
pub use likes::{LikeResponse, LikeSettlement, LikeTicket};
pub use models::*;
pub use notifications::NotificationList;
pub use posts::PostStore;
