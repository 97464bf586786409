//! Session flag - Persisted "logged in" state.
//!
//! The flag is a boolean preference stored under namespace `UserSession`, key
//! `isLoggedIn`. It lives in the `preferences` table, which schema resets leave
//! alone, and it does not record which user logged in.
//!
//! [`SessionContext`] wraps the flag for the front-end: it is restored once at
//! start-up, flipped by [`SessionContext::login`] and torn down by
//! [`SessionContext::logout`]. Screens that need an authenticated user call
//! [`SessionContext::require_login`].

use crate::{
    core::credential,
    entities::{Preference, preference},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument, warn};

/// Preference namespace holding the session flag
pub const SESSION_NAMESPACE: &str = "UserSession";
/// Key of the session flag within [`SESSION_NAMESPACE`]
pub const LOGGED_IN_KEY: &str = "isLoggedIn";

/// Reads a preference value, `None` if it was never written.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_preference<C>(db: &C, namespace: &str, key: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    let stored = Preference::find()
        .filter(preference::Column::Namespace.eq(namespace))
        .filter(preference::Column::Key.eq(key))
        .one(db)
        .await?;
    Ok(stored.map(|p| p.value))
}

/// Writes a preference value, replacing any previous value for the same key.
///
/// # Errors
/// Returns an error if the database read or write fails.
pub async fn set_preference<C>(db: &C, namespace: &str, key: &str, value: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();

    let existing = Preference::find()
        .filter(preference::Column::Namespace.eq(namespace))
        .filter(preference::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(stored) = existing {
        let mut active_model: preference::ActiveModel = stored.into();
        active_model.value = Set(value.to_string());
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_preference = preference::ActiveModel {
            namespace: Set(namespace.to_string()),
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };
        new_preference.insert(db).await?;
    }

    Ok(())
}

/// Persists the session flag. The write completes before this returns.
///
/// # Errors
/// Returns an error if the database write fails.
#[instrument(skip(db))]
pub async fn set_logged_in<C>(db: &C, logged_in: bool) -> Result<()>
where
    C: ConnectionTrait,
{
    set_preference(db, SESSION_NAMESPACE, LOGGED_IN_KEY, &logged_in.to_string()).await
}

/// Reads the session flag, `false` if it was never set.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn is_logged_in<C>(db: &C) -> Result<bool>
where
    C: ConnectionTrait,
{
    let Some(value) = get_preference(db, SESSION_NAMESPACE, LOGGED_IN_KEY).await? else {
        return Ok(false);
    };

    Ok(value.parse::<bool>().unwrap_or_else(|_| {
        warn!("Ignoring unreadable session flag value '{}'", value);
        false
    }))
}

/// Explicit session state handed to the screens that need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    logged_in: bool,
}

impl SessionContext {
    /// Builds the context from the persisted flag. Called once at start-up.
    ///
    /// # Errors
    /// Returns an error if the flag cannot be read.
    pub async fn restore(db: &DatabaseConnection) -> Result<Self> {
        let logged_in = is_logged_in(db).await?;
        info!("Session restored (logged in: {})", logged_in);
        Ok(Self { logged_in })
    }

    /// Whether a user is currently logged in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Fails with [`Error::NotLoggedIn`] unless a user is logged in.
    ///
    /// # Errors
    /// See above.
    pub fn require_login(&self) -> Result<()> {
        if self.logged_in {
            Ok(())
        } else {
            Err(Error::NotLoggedIn)
        }
    }

    /// Checks the credentials and, on a match, persists the logged-in flag.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Either field is empty ([`Error::InvalidInput`])
    /// - The pair is not registered ([`Error::InvalidCredentials`])
    /// - The database read or write fails
    #[instrument(skip(self, db, password))]
    pub async fn login(
        &mut self,
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<()> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::InvalidInput {
                message: "Please fill in all fields".to_string(),
            });
        }

        if !credential::verify(db, username, password).await? {
            return Err(Error::InvalidCredentials);
        }

        set_logged_in(db, true).await?;
        self.logged_in = true;
        info!("User '{}' logged in", username);
        Ok(())
    }

    /// Clears the persisted flag and ends the session.
    ///
    /// # Errors
    /// Returns an error if the database write fails; the context stays logged in.
    #[instrument(skip(self, db))]
    pub async fn logout(&mut self, db: &DatabaseConnection) -> Result<()> {
        set_logged_in(db, false).await?;
        self.logged_in = false;
        info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::database::open_database;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_flag_defaults_to_false() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(!is_logged_in(&db).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_and_clear_flag() -> Result<()> {
        let db = setup_test_db().await?;

        set_logged_in(&db, true).await?;
        assert!(is_logged_in(&db).await?);

        set_logged_in(&db, false).await?;
        assert!(!is_logged_in(&db).await?);

        // Overwrites keep a single row
        let rows = Preference::find().all(&db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].namespace, SESSION_NAMESPACE);
        assert_eq!(rows[0].key, LOGGED_IN_KEY);
        assert_eq!(rows[0].value, "false");
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_flag_counts_as_logged_out() -> Result<()> {
        let db = setup_test_db().await?;
        set_preference(&db, SESSION_NAMESPACE, LOGGED_IN_KEY, "maybe").await?;
        assert!(!is_logged_in(&db).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_preferences_are_namespaced() -> Result<()> {
        let db = setup_test_db().await?;
        set_preference(&db, "Other", LOGGED_IN_KEY, "true").await?;

        assert!(!is_logged_in(&db).await?);
        assert_eq!(
            get_preference(&db, "Other", LOGGED_IN_KEY).await?,
            Some("true".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_flag_survives_reopening_the_database() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("k4rt.sqlite").display());

        {
            let db = open_database(&url).await?;
            set_logged_in(&db, true).await?;
            db.close().await?;
        }

        let reopened = open_database(&url).await?;
        assert!(is_logged_in(&reopened).await?);
        assert!(SessionContext::restore(&reopened).await?.is_logged_in());
        Ok(())
    }

    #[tokio::test]
    async fn test_session_context_login_and_logout() -> Result<()> {
        let db = setup_test_db().await?;
        credential::register(&db, "alice", "secret").await?;

        let mut session = SessionContext::restore(&db).await?;
        assert!(!session.is_logged_in());
        assert!(matches!(session.require_login(), Err(Error::NotLoggedIn)));

        session.login(&db, "alice", "secret").await?;
        assert!(session.is_logged_in());
        assert!(session.require_login().is_ok());
        assert!(is_logged_in(&db).await?);

        session.logout(&db).await?;
        assert!(!session.is_logged_in());
        assert!(!is_logged_in(&db).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_session_context_rejects_bad_login() -> Result<()> {
        let db = setup_test_db().await?;
        credential::register(&db, "alice", "secret").await?;
        let mut session = SessionContext::restore(&db).await?;

        let result = session.login(&db, "alice", "SECRET").await;
        assert!(matches!(result.unwrap_err(), Error::InvalidCredentials));

        let result = session.login(&db, "", "secret").await;
        assert!(matches!(result.unwrap_err(), Error::InvalidInput { message: _ }));

        assert!(!session.is_logged_in());
        assert!(!is_logged_in(&db).await?);
        Ok(())
    }
}
