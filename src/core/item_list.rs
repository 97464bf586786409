//! List presentation sync - The in-memory item list shown on the inventory screen.
//!
//! The list is loaded from the store once and then kept in step with it by
//! applying the result of each mutation as a positional delta ([`ListChange`]),
//! never by reloading. Edits and deletes are addressed by item id; the position
//! is looked up when the change is applied, so a position remembered from an
//! earlier render can never point at the wrong item.
//!
//! A failed store call leaves the list exactly as it was. Nothing is applied
//! ahead of the store, so there is nothing to roll back.

use crate::{
    core::{form::ItemForm, item},
    entities::item::Model as ItemModel,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use tracing::{debug, warn};

/// A minimal change to the list, expressed as positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// A new element now sits at this index
    Inserted(usize),
    /// The element at this index was replaced
    Changed(usize),
    /// The element at this index was removed
    Removed(usize),
    /// Elements in `start..start + count` moved by one position
    RangeChanged {
        /// First shifted index
        start: usize,
        /// Number of shifted elements
        count: usize,
    },
}

/// What the inventory screen should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No items: show the placeholder
    Empty,
    /// At least one item: show the list
    Populated,
}

/// Receives list deltas as they are applied.
pub trait ListObserver {
    /// Called once per delta, in order.
    fn on_change(&mut self, change: ListChange);
}

/// Collects deltas, for callers that render after the operation finishes.
impl ListObserver for Vec<ListChange> {
    fn on_change(&mut self, change: ListChange) {
        self.push(change);
    }
}

/// Ordered in-memory mirror of the item store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemList {
    items: Vec<ItemModel>,
}

impl ItemList {
    /// Loads every stored item in storage order.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        let items = item::list_all(db).await?;
        debug!("Loaded {} items", items.len());
        Ok(Self { items })
    }

    /// The items in display order.
    #[must_use]
    pub fn items(&self) -> &[ItemModel] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ItemModel> {
        self.items.get(index)
    }

    /// Current position of the item with `id`.
    #[must_use]
    pub fn position_of(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    /// Placeholder or list.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        if self.items.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Populated
        }
    }

    /// Stores a new item and appends it, announcing one insertion at the end.
    ///
    /// # Errors
    /// Returns the store's error (invalid amounts, [`Error::WriteFailure`]); the
    /// list is unchanged.
    pub async fn add(
        &mut self,
        db: &DatabaseConnection,
        form: ItemForm,
        observer: &mut dyn ListObserver,
    ) -> Result<ItemModel> {
        let stored = item::insert(db, form.name, form.quantity, form.price).await?;

        self.items.push(stored.clone());
        observer.on_change(ListChange::Inserted(self.items.len() - 1));
        Ok(stored)
    }

    /// Replaces the fields of the item with `id`, announcing one change at its
    /// current position.
    ///
    /// # Errors
    /// Returns [`Error::ItemNotFound`] if the id is not in the list or the store
    /// updated no row, or the store's validation/database error. The list is
    /// unchanged in every error case.
    pub async fn edit(
        &mut self,
        db: &DatabaseConnection,
        id: i64,
        form: ItemForm,
        observer: &mut dyn ListObserver,
    ) -> Result<ItemModel> {
        let position = self.position_of(id).ok_or(Error::ItemNotFound { id })?;

        let updated = ItemModel {
            id,
            name: form.name,
            quantity: form.quantity,
            price: form.price,
        };
        if item::update(db, &updated).await? == 0 {
            warn!("Item {} is listed but missing from the store", id);
            return Err(Error::ItemNotFound { id });
        }

        self.items[position] = updated.clone();
        observer.on_change(ListChange::Changed(position));
        Ok(updated)
    }

    /// Deletes the item with `id`, announcing its removal and then the shift of
    /// every later position.
    ///
    /// # Errors
    /// Returns [`Error::ItemNotFound`] if the id is not in the list or the store
    /// deleted no row, or a database error. The list is unchanged in every
    /// error case.
    pub async fn remove(
        &mut self,
        db: &DatabaseConnection,
        id: i64,
        observer: &mut dyn ListObserver,
    ) -> Result<ItemModel> {
        let position = self.position_of(id).ok_or(Error::ItemNotFound { id })?;

        if item::delete_by_id(db, id).await? == 0 {
            warn!("Item {} is listed but missing from the store", id);
            return Err(Error::ItemNotFound { id });
        }

        let removed = self.items.remove(position);
        observer.on_change(ListChange::Removed(position));
        observer.on_change(ListChange::RangeChanged {
            start: position,
            count: self.items.len() - position,
        });
        Ok(removed)
    }
}
