//! Terminal front-end - Screens, command dispatch and transient notifications.
//!
//! This layer plays the part of the app screens: it parses one command per
//! line, calls into [`crate::core`], and turns every outcome into lines of text.
//! Domain errors never escape [`AppData::handle_line`]; they become a one-line
//! notification and the session carries on.

/// Command parsing and per-screen handlers
pub mod commands;
/// Text rendering of items, lists and list deltas
pub mod render;

use crate::{
    config::settings::AppSettings,
    core::{item_list::ItemList, session::SessionContext},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

/// Which screen is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Login and registration
    Welcome,
    /// The item list; requires a logged-in session
    Inventory,
}

/// Output of one handled command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Lines to print, in order
    pub lines: Vec<String>,
    /// Whether the front-end should exit
    pub quit: bool,
}

impl Reply {
    /// A reply consisting of a single transient notification.
    #[must_use]
    pub fn notify(message: impl Into<String>) -> Self {
        Self {
            lines: vec![render::notification(&message.into())],
            quit: false,
        }
    }

    /// Appends one line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

/// State shared by all commands.
/// Holds the database connection, the session and the list being displayed.
pub struct AppData {
    /// Database connection for all store operations
    pub database: DatabaseConnection,
    /// Front-end settings
    pub settings: AppSettings,
    session: SessionContext,
    screen: Screen,
    items: ItemList,
}

impl AppData {
    /// Restores the session and opens the first screen: the inventory if the
    /// persisted flag says a user is logged in, the welcome screen otherwise.
    ///
    /// # Errors
    /// Returns an error if the session flag or the item list cannot be read.
    pub async fn start(database: DatabaseConnection, settings: AppSettings) -> Result<Self> {
        let session = SessionContext::restore(&database).await?;
        let mut app = Self {
            database,
            settings,
            session,
            screen: Screen::Welcome,
            items: ItemList::default(),
        };

        if app.session.is_logged_in() {
            app.open_inventory().await?;
        }
        info!("Starting on {:?} screen", app.screen);
        Ok(app)
    }

    /// The active screen.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// The list shown on the inventory screen.
    #[must_use]
    pub const fn items(&self) -> &ItemList {
        &self.items
    }

    /// The session context.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Switches to the inventory screen, loading the list from the store.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::NotLoggedIn`] without a session, or a
    /// database error if the list cannot be loaded.
    pub(crate) async fn open_inventory(&mut self) -> Result<()> {
        self.session.require_login()?;
        self.items = ItemList::load(&self.database).await?;
        self.screen = Screen::Inventory;
        Ok(())
    }

    /// Switches back to the welcome screen and drops the displayed list.
    pub(crate) fn open_welcome(&mut self) {
        self.items = ItemList::default();
        self.screen = Screen::Welcome;
    }

    /// Text shown when a screen is entered.
    #[must_use]
    pub fn screen_intro(&self) -> Vec<String> {
        match self.screen {
            Screen::Welcome => vec![
                "Welcome. Log in or register to manage your inventory.".to_string(),
                "Type `help` for commands.".to_string(),
            ],
            Screen::Inventory => render::list(&self.items, &self.settings.currency_prefix),
        }
    }

    /// Handles one line of input and returns what to print.
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        let command = match commands::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Reply::default(),
            Err(e) => return Reply::notify(e.to_string()),
        };
        debug!("Handling command on {:?} screen", self.screen);

        commands::dispatch(self, command).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::session;
    use crate::test_utils::*;

    fn settings() -> AppSettings {
        AppSettings {
            splash_delay_ms: 0,
            ..AppSettings::default()
        }
    }

    #[tokio::test]
    async fn test_starts_on_welcome_without_session() -> Result<()> {
        let db = setup_test_db().await?;
        let app = AppData::start(db, settings()).await?;
        assert_eq!(app.screen(), Screen::Welcome);
        assert!(app.items().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_starts_on_inventory_with_session() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_item(&db, "Pen").await?;
        session::set_logged_in(&db, true).await?;

        let app = AppData::start(db, settings()).await?;
        assert_eq!(app.screen(), Screen::Inventory);
        assert_eq!(app.items().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_line_prints_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let mut app = AppData::start(db, settings()).await?;
        assert_eq!(app.handle_line("   ").await, Reply::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_full_session() -> Result<()> {
        let db = setup_test_db().await?;
        let mut app = AppData::start(db, settings()).await?;

        let reply = app.handle_line("register alice pw pw").await;
        assert!(reply.lines[0].contains("Registration successful"));

        let reply = app.handle_line("login alice wrong").await;
        assert!(reply.lines[0].contains("Wrong username or password"));
        assert_eq!(app.screen(), Screen::Welcome);

        app.handle_line("login alice pw").await;
        assert_eq!(app.screen(), Screen::Inventory);

        let reply = app.handle_line("add 10 1.500 Blue Pen").await;
        assert!(reply.lines.iter().any(|l| l.contains("Blue Pen") && l.contains("Rp.1.500")));
        let id = app.items().get(0).unwrap().id;

        app.handle_line(&format!("edit {id} 5 1500 Blue Pen")).await;
        assert_eq!(app.items().get(0).unwrap().quantity, 5);

        let reply = app.handle_line(&format!("delete {id}")).await;
        assert!(reply.lines.iter().any(|l| l.contains("Item deleted")));
        assert!(app.items().is_empty());

        app.handle_line("logout").await;
        assert_eq!(app.screen(), Screen::Welcome);
        assert!(!session::is_logged_in(&app.database).await?);

        let reply = app.handle_line("quit").await;
        assert!(reply.quit);
        Ok(())
    }
}
