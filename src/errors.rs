//! Unified error types for the inventory keeper.
//!
//! Every fallible operation in the crate returns [`Result`]. Domain failures
//! (duplicate usernames, missing items, rejected form input) are recovered by
//! the caller, which shows a transient notification; only configuration and
//! database start-up errors end the process.

use thiserror::Error;

/// All errors that can occur in the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings could not be read or are invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any error reported by the database driver
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem or terminal I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A credential with this username already exists
    #[error("Username '{username}' is already registered")]
    DuplicateUsername {
        /// The rejected username
        username: String,
    },

    /// No item with this id exists (zero rows affected, or absent from the list)
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// Storing a new item failed
    #[error("Failed to save item: {reason}")]
    WriteFailure {
        /// Driver message for the failed write
        reason: String,
    },

    /// Price is negative, NaN or infinite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Quantity is negative
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// Form input was missing or malformed
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Message suitable for showing to the user
        message: String,
    },

    /// Username and password did not match a registered credential
    #[error("Wrong username or password")]
    InvalidCredentials,

    /// An operation that needs a logged-in session was attempted without one
    #[error("Not logged in")]
    NotLoggedIn,

    /// The database was written by a newer schema than this build understands
    #[error("Database schema version {found} is newer than supported version {supported}")]
    SchemaDowngrade {
        /// Version found in the database file
        found: i32,
        /// Highest version this build knows
        supported: i32,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
