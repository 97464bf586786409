//! Item entity - A single inventory record.
//!
//! Items carry a name, an on-hand quantity and a unit price. Ids are assigned by
//! `SQLite` (`AUTOINCREMENT`), so an id is never handed out twice, even after the
//! row holding it has been deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Store-assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Pen")
    pub name: String,
    /// Units on hand, never negative
    pub quantity: i64,
    /// Unit price, never negative
    pub price: f64,
}

/// Items have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
