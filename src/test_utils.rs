//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{core::item, entities, errors::Result};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with the current schema.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::prepare_schema(&db).await?;
    Ok(db)
}

/// Creates a test item with sensible defaults.
///
/// # Defaults
/// * `quantity`: 1
/// * `price`: 1000.0
pub async fn create_test_item(db: &DatabaseConnection, name: &str) -> Result<entities::item::Model> {
    item::insert(db, name.to_string(), 1, 1000.0).await
}

/// Creates a test item with custom quantity and price.
pub async fn create_custom_item(
    db: &DatabaseConnection,
    name: &str,
    quantity: i64,
    price: f64,
) -> Result<entities::item::Model> {
    item::insert(db, name.to_string(), quantity, price).await
}

/// Sets up a test database with one registered user, `tester` / `password`.
pub async fn setup_with_user() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    crate::core::credential::register(&db, "tester", "password").await?;
    Ok(db)
}
