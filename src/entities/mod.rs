//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod item;
pub mod preference;
pub mod user;

// Re-export specific types to avoid conflicts
pub use item::{Column as ItemColumn, Entity as Item, Model as ItemModel};
pub use preference::{
    Column as PreferenceColumn, Entity as Preference, Model as PreferenceModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
