//! Inventory commands - list, add, edit and delete.
//!
//! Each mutation goes through [`crate::core::item_list::ItemList`], which
//! reports positional deltas; only the rows named by those deltas are printed.

use crate::{
    app::{AppData, Reply, render},
    core::{form::ItemForm, item_list::ListChange},
    errors::Error,
};
use tracing::error;

fn failure(action: &str, e: &Error) -> Reply {
    if matches!(e, Error::Database(_)) {
        error!("Failed to {}: {}", action, e);
    }
    Reply::notify(format!("Failed to {action}: {e}"))
}

fn with_changes(app: &AppData, message: &str, changes: &[ListChange]) -> Reply {
    let prefix = &app.settings.currency_prefix;
    let mut reply = Reply::notify(message);
    reply
        .lines
        .extend(render::changes(&app.items, changes, prefix));
    if app.items.is_empty() {
        reply.push(render::EMPTY_PLACEHOLDER);
    }
    reply
}

/// Prints the full list, or the placeholder when it is empty.
#[must_use]
pub fn list(app: &AppData) -> Reply {
    Reply {
        lines: render::list(&app.items, &app.settings.currency_prefix),
        quit: false,
    }
}

/// Stores a new item and shows the inserted row.
pub async fn add(app: &mut AppData, form: ItemForm) -> Reply {
    let mut changes: Vec<ListChange> = Vec::new();
    match app.items.add(&app.database, form, &mut changes).await {
        Ok(_) => with_changes(app, "Item added", &changes),
        Err(e) => failure("add item", &e),
    }
}

/// Replaces an item's fields and shows the changed row.
pub async fn edit(app: &mut AppData, id: i64, form: ItemForm) -> Reply {
    let mut changes: Vec<ListChange> = Vec::new();
    match app.items.edit(&app.database, id, form, &mut changes).await {
        Ok(_) => with_changes(app, "Item updated", &changes),
        Err(e) => failure("update item", &e),
    }
}

/// Removes an item and reports the shifted positions.
pub async fn delete(app: &mut AppData, id: i64) -> Reply {
    let mut changes: Vec<ListChange> = Vec::new();
    match app.items.remove(&app.database, id, &mut changes).await {
        Ok(_) => with_changes(app, "Item deleted", &changes),
        Err(e) => failure("delete item", &e),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        config::settings::AppSettings, core::session, errors::Result, test_utils::*,
    };

    async fn logged_in_app() -> Result<AppData> {
        let db = setup_test_db().await?;
        session::set_logged_in(&db, true).await?;
        AppData::start(db, AppSettings::default()).await
    }

    #[tokio::test]
    async fn test_empty_list_shows_placeholder() -> Result<()> {
        let app = logged_in_app().await?;
        assert_eq!(list(&app).lines, vec![render::EMPTY_PLACEHOLDER.to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_unknown_item_is_notified() -> Result<()> {
        let mut app = logged_in_app().await?;
        let form = ItemForm::parse("Pen", "1", "100")?;

        let reply = edit(&mut app, 42, form).await;
        assert_eq!(reply.lines.len(), 1);
        assert!(reply.lines[0].contains("Failed to update item"));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_twice_second_fails() -> Result<()> {
        let mut app = logged_in_app().await?;
        add(&mut app, ItemForm::parse("Pen", "1", "100")?).await;
        let id = app.items.get(0).unwrap().id;

        let reply = delete(&mut app, id).await;
        assert!(reply.lines[0].contains("Item deleted"));
        assert!(reply.lines.contains(&render::EMPTY_PLACEHOLDER.to_string()));

        let reply = delete(&mut app, id).await;
        assert!(reply.lines[0].contains("Failed to delete item"));
        Ok(())
    }

    #[tokio::test]
    async fn test_negative_quantity_is_notified() -> Result<()> {
        let mut app = logged_in_app().await?;
        let reply = add(&mut app, ItemForm::parse("Pen", "-2", "100")?).await;
        assert!(reply.lines[0].contains("Invalid quantity"));
        assert!(app.items.is_empty());
        Ok(())
    }
}
