//! Credential store - Local registration and login checks.
//!
//! Usernames are the primary key of the `users` table, so a second registration
//! under the same name is rejected by the database itself. Passwords are kept
//! and compared as plain text; there is no hashing or salting.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, Set, SqlErr, prelude::*};
use tracing::{info, instrument};

/// Registers a new credential and returns its user id (the username).
///
/// # Errors
/// Returns [`Error::DuplicateUsername`] if the username is already taken, or a
/// database error if the insert fails for another reason.
#[instrument(skip(db, password))]
pub async fn register(db: &DatabaseConnection, username: &str, password: &str) -> Result<String> {
    if User::find_by_id(username.to_string()).one(db).await?.is_some() {
        return Err(Error::DuplicateUsername {
            username: username.to_string(),
        });
    }

    let credential = user::ActiveModel {
        username: Set(username.to_string()),
        password: Set(password.to_string()),
    };

    match User::insert(credential).exec_without_returning(db).await {
        Ok(_) => {
            info!("Registered user '{}'", username);
            Ok(username.to_string())
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(Error::DuplicateUsername {
                username: username.to_string(),
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Returns true iff a credential with exactly this username and password exists.
///
/// Matching is case-sensitive with no normalization of either field.
///
/// # Errors
/// Returns an error if the database query fails.
#[instrument(skip(db, password))]
pub async fn verify(db: &DatabaseConnection, username: &str, password: &str) -> Result<bool> {
    let matches = User::find()
        .filter(user::Column::Username.eq(username))
        .filter(user::Column::Password.eq(password))
        .count(db)
        .await?;
    Ok(matches > 0)
}
