//! Command parsing and dispatch.
//!
//! One command per line; the first word names the command. Item names may
//! contain spaces, so they always come last.

/// Login, registration and logout
pub mod auth;
/// Help and quit
pub mod general;
/// Listing and editing items
pub mod inventory;

use super::{AppData, Reply, Screen};
use crate::{
    core::form::ItemForm,
    errors::{Error, Result},
};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the commands available on the current screen
    Help,
    /// Leave the program
    Quit,
    /// `register <username> <password> <confirm>`
    Register {
        /// Requested username
        username: String,
        /// Password
        password: String,
        /// Password typed a second time
        confirm: String,
    },
    /// `login <username> <password>`
    Login {
        /// Username
        username: String,
        /// Password
        password: String,
    },
    /// End the session
    Logout,
    /// Print the whole list
    List,
    /// `add <quantity> <price> <name...>`
    Add {
        /// Parsed item fields
        form: ItemForm,
    },
    /// `edit <id> <quantity> <price> <name...>`
    Edit {
        /// Item to change
        id: i64,
        /// New item fields
        form: ItemForm,
    },
    /// `delete <id>`
    Delete {
        /// Item to remove
        id: i64,
    },
}

fn usage(text: &str) -> Error {
    Error::InvalidInput {
        message: format!("Usage: {text}"),
    }
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|_| Error::InvalidInput {
        message: format!("'{raw}' is not an item id"),
    })
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for unknown commands, wrong argument counts
/// or malformed numbers.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (name.to_lowercase().as_str(), args) {
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        ("register", [username, password, confirm]) => Command::Register {
            username: (*username).to_string(),
            password: (*password).to_string(),
            confirm: (*confirm).to_string(),
        },
        ("register", _) => return Err(usage("register <username> <password> <confirm>")),
        ("login", [username, password]) => Command::Login {
            username: (*username).to_string(),
            password: (*password).to_string(),
        },
        ("login", _) => return Err(usage("login <username> <password>")),
        ("logout", []) => Command::Logout,
        ("list", []) => Command::List,
        ("add", [quantity, price, name @ ..]) if !name.is_empty() => Command::Add {
            form: ItemForm::parse(&name.join(" "), quantity, price)?,
        },
        ("add", _) => return Err(usage("add <quantity> <price> <name>")),
        ("edit", [id, quantity, price, name @ ..]) if !name.is_empty() => Command::Edit {
            id: parse_id(id)?,
            form: ItemForm::parse(&name.join(" "), quantity, price)?,
        },
        ("edit", _) => return Err(usage("edit <id> <quantity> <price> <name>")),
        ("delete", [id]) => Command::Delete { id: parse_id(id)? },
        ("delete", _) => return Err(usage("delete <id>")),
        (other, _) => {
            return Err(Error::InvalidInput {
                message: format!("Unknown command '{other}'. Type `help` for commands."),
            });
        }
    };

    Ok(Some(command))
}

/// Runs a command against the active screen.
pub async fn dispatch(app: &mut AppData, command: Command) -> Reply {
    match (app.screen(), command) {
        (_, Command::Help) => general::help(app.screen()),
        (_, Command::Quit) => general::quit(),
        (
            Screen::Welcome,
            Command::Register {
                username,
                password,
                confirm,
            },
        ) => auth::register(app, &username, &password, &confirm).await,
        (Screen::Welcome, Command::Login { username, password }) => {
            auth::login(app, &username, &password).await
        }
        (Screen::Inventory, Command::Logout) => auth::logout(app).await,
        (Screen::Inventory, Command::List) => inventory::list(app),
        (Screen::Inventory, Command::Add { form }) => inventory::add(app, form).await,
        (Screen::Inventory, Command::Edit { id, form }) => inventory::edit(app, id, form).await,
        (Screen::Inventory, Command::Delete { id }) => inventory::delete(app, id).await,
        (Screen::Welcome, _) => Reply::notify("Please log in first"),
        (Screen::Inventory, _) => Reply::notify("Log out first to use that command"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    #![allow(clippy::panic)]
    use super::*;

    #[test]
    fn test_parse_blank() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse(" \t ").unwrap(), None);
    }

    #[test]
    fn test_parse_add_with_spaced_name() {
        let command = parse("add 3 12.500 Red Marker Pen").unwrap().unwrap();
        let Command::Add { form } = command else {
            panic!("expected add, got {command:?}");
        };
        assert_eq!(form.name, "Red Marker Pen");
        assert_eq!(form.quantity, 3);
        assert_eq!(form.price, 12_500.0);
    }

    #[test]
    fn test_parse_edit_and_delete() {
        assert!(matches!(
            parse("edit 7 1 100 Pen").unwrap(),
            Some(Command::Edit { id: 7, form: _ })
        ));
        assert_eq!(parse("DELETE 7").unwrap(), Some(Command::Delete { id: 7 }));
    }

    #[test]
    fn test_parse_errors() {
        for line in ["add 1 100", "edit x 1 100 Pen", "delete", "login alice", "fly away"] {
            assert!(
                matches!(parse(line), Err(Error::InvalidInput { message: _ })),
                "{line} should not parse"
            );
        }
    }
}
