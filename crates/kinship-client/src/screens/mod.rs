//! Headless screen controllers.
//!
//! Each screen owns its local state behind a mutex that is never held across
//! a network call, refreshes it on `focus`, and reports failures as
//! [`crate::events::UiEvent`]s.

pub mod chat_detail;
pub mod chats;
pub mod compose;
pub mod friends;
pub mod notifications;
pub mod posts;
pub mod profile;
pub mod search;

pub use chat_detail::ChatDetailScreen;
pub use chats::ChatListScreen;
pub use compose::ComposeScreen;
pub use friends::FriendsScreen;
pub use notifications::NotificationsScreen;
pub use posts::{PostCard, PostListScreen};
pub use profile::ProfileScreen;
pub use search::SearchScreen;
