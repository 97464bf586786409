//! Preference entity - Namespaced key-value pairs that outlive schema resets.
//! Holds the persisted session flag (`UserSession` / `isLoggedIn`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Preference database model - one value per `(namespace, key)` pair
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "preferences")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Group the key belongs to (e.g., `"UserSession"`)
    pub namespace: String,
    /// Key within the namespace (e.g., `"isLoggedIn"`)
    pub key: String,
    /// Value stored as text
    pub value: String,
    /// When this value was last written
    pub updated_at: DateTime,
}

/// `Preference` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
