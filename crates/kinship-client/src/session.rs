//! Sign-in, sign-up and sign-out.
//!
//! A successful login yields a [`Session`]: the authenticated user, passed
//! explicitly to every screen that needs to know who "me" is. The HTTP
//! client carries the server's session cookie on its own.

use tracing::{info, warn};

use kinship_shared::protocol::{LoginRequest, SignupRequest};
use kinship_shared::{Notification, User, UserId, UserRef};

use crate::error::{ClientError, Result};
use crate::state::AppContext;

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    pub fn user_ref(&self) -> UserRef {
        self.user.to_ref()
    }

    /// Friend requests pending at the time the user record was fetched.
    pub fn notifications(&self) -> &[Notification] {
        &self.user.notifications
    }

    /// Re-read the user record from `/users/me`.
    pub async fn refresh(&mut self, ctx: &AppContext) -> Result<()> {
        let user = ctx.api.me().await?;
        if user.id != self.user.id {
            warn!(expected = %self.user.id.short(), got = %user.id.short(), "Session user changed server-side");
            return Err(ClientError::NotAuthenticated);
        }
        self.user = user;
        Ok(())
    }
}

/// Sign-up form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<Session> {
    let request = LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };

    match ctx.api.login(&request).await {
        Ok(user) => {
            info!(user = %user.id.short(), notifications = user.notifications.len(), "Logged in");
            Ok(Session::new(user))
        }
        Err(e) => {
            warn!(error = %e, "Login failed");
            ctx.events.alert("Login failed", e.to_string());
            Err(e)
        }
    }
}

/// Register a new account. Mismatched passwords never reach the server.
pub async fn signup(ctx: &AppContext, form: &SignupForm) -> Result<()> {
    if form.password != form.confirm_password {
        return Err(ClientError::PasswordMismatch);
    }

    let request = SignupRequest {
        username: form.username.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        confirm_password: form.confirm_password.clone(),
    };

    if let Err(e) = ctx.api.signup(&request).await {
        warn!(error = %e, "Sign up failed");
        ctx.events.alert("Sign up failed", e.to_string());
        return Err(e);
    }
    info!(username = %request.username, "Signed up");
    Ok(())
}

/// End the session. The session value is consumed either way.
pub async fn signout(ctx: &AppContext, session: Session) -> Result<()> {
    let user = session.user_id().short().to_string();
    ctx.api.signout().await.map_err(|e| {
        warn!(%user, error = %e, "Log out failed");
        e
    })?;
    info!(%user, "Logged out");
    Ok(())
}
