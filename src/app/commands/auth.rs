//! Registration, login and logout.

use crate::{
    app::{AppData, Reply},
    core::{credential, form},
    errors::Error,
};
use tracing::error;

/// Validates the form and stores the new credential.
pub async fn register(app: &mut AppData, username: &str, password: &str, confirm: &str) -> Reply {
    if let Err(e) = form::validate_registration(username, password, confirm) {
        return Reply::notify(e.to_string());
    }

    match credential::register(&app.database, username, password).await {
        Ok(_) => Reply::notify("Registration successful! You can log in now."),
        Err(Error::DuplicateUsername { .. }) => {
            Reply::notify("Registration failed: that username is taken")
        }
        Err(e) => {
            error!("Registration failed: {}", e);
            Reply::notify("Registration failed")
        }
    }
}

/// Logs in and opens the inventory screen.
pub async fn login(app: &mut AppData, username: &str, password: &str) -> Reply {
    if let Err(e) = app.session.login(&app.database, username, password).await {
        return Reply::notify(e.to_string());
    }

    if let Err(e) = app.open_inventory().await {
        error!("Could not open inventory: {}", e);
        return Reply::notify(format!("Could not load items: {e}"));
    }

    let mut reply = Reply::notify("Login successful!");
    reply.lines.extend(app.screen_intro());
    reply
}

/// Clears the session and returns to the welcome screen.
pub async fn logout(app: &mut AppData) -> Reply {
    if let Err(e) = app.session.logout(&app.database).await {
        error!("Logout failed: {}", e);
        return Reply::notify("Logout failed");
    }

    app.open_welcome();
    let mut reply = Reply::notify("You have been logged out");
    reply.lines.extend(app.screen_intro());
    reply
}
