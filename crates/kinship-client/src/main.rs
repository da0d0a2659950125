//! Command-line smoke client.
//!
//! Logs in with `KINSHIP_EMAIL` / `KINSHIP_PASSWORD`, loads the home feed,
//! chats and pending friend requests, and logs what it found.

use anyhow::Context;
use tracing::info;

use kinship_client::screens::{ChatListScreen, NotificationsScreen, PostListScreen};
use kinship_client::{init_logging, session, AppContext, ClientConfig, UiEvent};
use kinship_shared::constants::APP_NAME;
use kinship_shared::{Feed, MediaView};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    info!("Starting {} client v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::from_env();
    info!(?config, "Loaded configuration");

    let email = std::env::var("KINSHIP_EMAIL").context("KINSHIP_EMAIL is not set")?;
    let password = std::env::var("KINSHIP_PASSWORD").context("KINSHIP_PASSWORD is not set")?;

    let ctx = AppContext::from_config(config)?;

    let mut events = ctx.events.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                UiEvent::Alert { title, message } => tracing::warn!(%title, %message, "Alert"),
                UiEvent::Notice { message } => info!(%message, "Notice"),
            }
        }
    });

    let session = session::login(&ctx, &email, &password)
        .await
        .context("login failed")?;
    info!(user = %session.user().display_name(), "Signed in");

    let home = PostListScreen::new(ctx.clone(), Feed::Recent);
    home.focus().await.context("could not load the home feed")?;
    for card in home.cards() {
        let media = match &card.media {
            MediaView::Placeholder => 0,
            MediaView::Images(urls) => urls.len(),
        };
        info!(
            post = %card.id.short(),
            author = %card.author,
            likes = card.likes_count,
            media,
            "{}",
            card.content
        );
    }

    let chats = ChatListScreen::new(ctx.clone(), session.clone());
    chats.focus().await.context("could not load chats")?;
    for chat in chats.chats() {
        info!(chat = %chat.id.short(), with = %chats.peer_of(&chat).username, "Chat");
    }

    let notifications = NotificationsScreen::new(ctx.clone(), &session);
    for entry in notifications.entries() {
        info!(from = %entry.notification.from.username, "Pending friend request");
    }

    session::signout(&ctx, session).await?;
    Ok(())
}
