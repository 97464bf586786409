//! Text rendering for the inventory screen.

use crate::{
    core::{
        form::format_price,
        item_list::{ItemList, ListChange, ViewState},
    },
    entities::item::Model as ItemModel,
};

/// Shown instead of the list when there are no items.
pub const EMPTY_PLACEHOLDER: &str = "No items yet. Use `add` to create one.";

/// A transient notification line.
#[must_use]
pub fn notification(message: &str) -> String {
    format!("» {message}")
}

/// One item row, e.g. `#3  Pen  qty 10  Rp.1.500`.
#[must_use]
pub fn item_row(item: &ItemModel, currency_prefix: &str) -> String {
    format!(
        "#{}  {}  qty {}  {}{}",
        item.id,
        item.name,
        item.quantity,
        currency_prefix,
        format_price(item.price)
    )
}

/// The whole list, or the placeholder.
#[must_use]
pub fn list(items: &ItemList, currency_prefix: &str) -> Vec<String> {
    match items.view_state() {
        ViewState::Empty => vec![EMPTY_PLACEHOLDER.to_string()],
        ViewState::Populated => items
            .items()
            .iter()
            .enumerate()
            .map(|(position, item)| format!("{:>3}. {}", position + 1, item_row(item, currency_prefix)))
            .collect(),
    }
}

/// Lines for a batch of deltas, reading the rows they point at from `items`.
#[must_use]
pub fn changes(items: &ItemList, changes: &[ListChange], currency_prefix: &str) -> Vec<String> {
    changes
        .iter()
        .filter_map(|change| match *change {
            ListChange::Inserted(i) => items
                .get(i)
                .map(|item| format!("+ {:>3}. {}", i + 1, item_row(item, currency_prefix))),
            ListChange::Changed(i) => items
                .get(i)
                .map(|item| format!("~ {:>3}. {}", i + 1, item_row(item, currency_prefix))),
            ListChange::Removed(i) => Some(format!("- {:>3}.", i + 1)),
            ListChange::RangeChanged { count: 0, .. } => None,
            ListChange::RangeChanged { start, count } => Some(format!(
                "  rows {}-{} moved up",
                start + 2,
                start + count + 1
            )),
        })
        .collect()
}
