//! Item store - Persistence for inventory records.
//!
//! Four operations cover the table: insert, full scan, update by id and delete
//! by id. Update and delete report how many rows they touched instead of
//! failing on a missing id, so deleting the same id twice is harmless and the
//! second call simply returns 0.

use crate::{
    entities::{Item, item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument, warn};

fn validate_amounts(quantity: i64, price: f64) -> Result<()> {
    if quantity < 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    if price < 0.0 || !price.is_finite() {
        return Err(Error::InvalidAmount { amount: price });
    }

    Ok(())
}

/// Stores a new item and returns it with its freshly assigned id.
///
/// Ids increase monotonically and are never reused. The name is stored as
/// given; checking that it is non-empty belongs to the input form.
///
/// # Errors
/// Returns an error if:
/// - The quantity is negative
/// - The price is negative or not finite (NaN, infinity)
/// - The database write fails ([`Error::WriteFailure`])
#[instrument(skip(db))]
pub async fn insert(
    db: &DatabaseConnection,
    name: String,
    quantity: i64,
    price: f64,
) -> Result<item::Model> {
    validate_amounts(quantity, price)?;

    let item = item::ActiveModel {
        name: Set(name),
        quantity: Set(quantity),
        price: Set(price),
        ..Default::default()
    };

    let stored = item.insert(db).await.map_err(|e| {
        warn!("Item insert failed: {}", e);
        Error::WriteFailure {
            reason: e.to_string(),
        }
    })?;
    debug!("Stored item {} with id {}", stored.name, stored.id);
    Ok(stored)
}

/// Returns every stored item in storage order (ascending id, which is
/// insertion order). Each call reads a fresh snapshot.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<item::Model>> {
    Item::find()
        .order_by_asc(item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a single item by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<item::Model>> {
    Item::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Replaces name, quantity and price of the item with `item.id`.
///
/// Returns the number of rows changed: 1 on success, 0 when no item has that id.
///
/// # Errors
/// Returns an error if the new quantity or price is invalid, or the database
/// update fails.
#[instrument(skip(db))]
pub async fn update(db: &DatabaseConnection, item: &item::Model) -> Result<u64> {
    validate_amounts(item.quantity, item.price)?;

    let changes = item::ActiveModel {
        name: Set(item.name.clone()),
        quantity: Set(item.quantity),
        price: Set(item.price),
        ..Default::default()
    };

    let result = Item::update_many()
        .set(changes)
        .filter(item::Column::Id.eq(item.id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes the item with `id`, returning 1 if it existed and 0 otherwise.
///
/// # Errors
/// Returns an error if the database delete fails.
#[instrument(skip(db))]
pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<u64> {
    let result = Item::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}
