//! Database configuration module.
//!
//! Opens the `SQLite` database through `SeaORM` and keeps its schema in step with
//! this build. Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the SQL always matches the Rust models.
//!
//! The schema version lives in `PRAGMA user_version`. An older version triggers
//! the reset policy: `items` and `users` are dropped and recreated, losing their
//! rows. The `preferences` table sits outside the versioned set and survives,
//! which keeps the session flag across upgrades.

use crate::entities::{Item, Preference, User, preference};
use crate::errors::{Error, Result};
use sea_orm::sea_query::{Index, Table};
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, Schema, Statement, TransactionTrait,
};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Current schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 2;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/k4rt.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling
/// back to a local `SQLite` file under `data/`.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Connects to `database_url` and brings the schema up to [`SCHEMA_VERSION`].
///
/// For file-backed `SQLite` URLs the parent directory is created first.
///
/// # Errors
/// Returns an error if the directory cannot be created, the connection fails,
/// or the schema cannot be prepared (see [`prepare_schema`]).
#[instrument]
pub async fn open_database(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        std::fs::create_dir_all(dir)?;
    }

    let db = Database::connect(database_url).await?;
    prepare_schema(&db).await?;
    info!("Database ready at {}", database_url);
    Ok(db)
}

/// Returns the directory holding a file-backed `SQLite` database, if any.
fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next()?;
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path).parent().filter(|p| !p.as_os_str().is_empty())
}

/// Reads the schema version stored in the database file (0 for a fresh file).
pub async fn read_schema_version<C>(db: &C) -> Result<i32>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(backend, "PRAGMA user_version"))
        .await?;

    match row {
        Some(row) => Ok(row.try_get_by_index::<i32>(0)?),
        None => Ok(0),
    }
}

async fn write_schema_version<C>(db: &C, version: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    db.execute_unprepared(&format!("PRAGMA user_version = {version}"))
        .await?;
    Ok(())
}

/// Creates all tables that do not exist yet.
///
/// `items` and `users` are the versioned tables; `preferences` and its
/// `(namespace, key)` unique index are created alongside them.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut item_table = schema.create_table_from_entity(Item);
    let mut user_table = schema.create_table_from_entity(User);
    let mut preference_table = schema.create_table_from_entity(Preference);

    item_table.if_not_exists();
    user_table.if_not_exists();
    preference_table.if_not_exists();

    db.execute(builder.build(&item_table)).await?;
    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&preference_table)).await?;

    let preference_key_index = Index::create()
        .name("idx_preferences_namespace_key")
        .table(Preference)
        .col(preference::Column::Namespace)
        .col(preference::Column::Key)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&preference_key_index)).await?;

    Ok(())
}

async fn drop_versioned_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let drop_items = Table::drop().table(Item).if_exists().to_owned();
    let drop_users = Table::drop().table(User).if_exists().to_owned();

    db.execute(builder.build(&drop_items)).await?;
    db.execute(builder.build(&drop_users)).await?;
    Ok(())
}

/// Brings the database schema to [`SCHEMA_VERSION`].
///
/// - version 0: fresh file, tables are created
/// - older version: `items` and `users` are dropped and recreated in one transaction
/// - same version: tables are ensured, nothing else changes
///
/// # Errors
/// Returns [`Error::SchemaDowngrade`] when the file carries a newer version, or a
/// database error if any statement fails.
pub async fn prepare_schema(db: &DatabaseConnection) -> Result<()> {
    let found = read_schema_version(db).await?;
    debug!("Stored schema version {}, current {}", found, SCHEMA_VERSION);

    if found > SCHEMA_VERSION {
        return Err(Error::SchemaDowngrade {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    let txn = db.begin().await?;
    if found != 0 && found < SCHEMA_VERSION {
        warn!(
            "Upgrading schema from version {} to {}: items and users are reset",
            found, SCHEMA_VERSION
        );
        drop_versioned_tables(&txn).await?;
    }
    create_tables(&txn).await?;
    if found != SCHEMA_VERSION {
        write_schema_version(&txn, SCHEMA_VERSION).await?;
    }
    txn.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{item, session};
    use crate::entities::{ItemModel, PreferenceModel, UserModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ItemModel> = Item::find().limit(1).all(&db).await?;
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<PreferenceModel> = Preference::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_fresh_database_gets_current_version() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        assert_eq!(read_schema_version(&db).await?, 0);

        prepare_schema(&db).await?;
        assert_eq!(read_schema_version(&db).await?, SCHEMA_VERSION);

        // Preparing again is a no-op
        prepare_schema(&db).await?;
        assert_eq!(read_schema_version(&db).await?, SCHEMA_VERSION);
        Ok(())
    }

    #[tokio::test]
    async fn test_same_version_keeps_rows() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        prepare_schema(&db).await?;
        item::insert(&db, "Pen".to_string(), 10, 1500.0).await?;

        prepare_schema(&db).await?;
        assert_eq!(item::list_all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_upgrade_resets_items_and_users_but_not_session() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        prepare_schema(&db).await?;
        item::insert(&db, "Pen".to_string(), 10, 1500.0).await?;
        crate::core::credential::register(&db, "alice", "secret").await?;
        session::set_logged_in(&db, true).await?;

        // Pretend the file was written by version 1
        write_schema_version(&db, 1).await?;
        prepare_schema(&db).await?;

        assert_eq!(read_schema_version(&db).await?, SCHEMA_VERSION);
        assert!(item::list_all(&db).await?.is_empty());
        assert!(!crate::core::credential::verify(&db, "alice", "secret").await?);
        assert!(session::is_logged_in(&db).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_newer_version_is_refused() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        write_schema_version(&db, SCHEMA_VERSION + 1).await?;

        let result = prepare_schema(&db).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::SchemaDowngrade { found, supported } if found == SCHEMA_VERSION + 1 && supported == SCHEMA_VERSION
        ));
        Ok(())
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite://data/k4rt.sqlite?mode=rwc"),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("sqlite://k4rt.sqlite"), None);
        assert_eq!(sqlite_parent_dir("postgres://localhost/db"), None);
    }
}
