//! User entity - Local login credentials.
//!
//! The username is the primary key, so uniqueness is enforced by the table
//! itself. Passwords are stored and compared as plain text.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Login name, compared case-sensitively
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    /// Plain text password
    pub password: String,
}

/// `User` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
