//! General commands available on every screen.

use crate::app::{Reply, Screen};

/// Lists the commands of the given screen.
#[must_use]
pub fn help(screen: Screen) -> Reply {
    let lines = match screen {
        Screen::Welcome => vec![
            "register <username> <password> <confirm>  create an account",
            "login <username> <password>               log in",
            "quit                                      leave",
        ],
        Screen::Inventory => vec![
            "list                                      show all items",
            "add <quantity> <price> <name>             add an item",
            "edit <id> <quantity> <price> <name>       change an item",
            "delete <id>                               remove an item",
            "logout                                    end the session",
            "quit                                      leave",
        ],
    };

    Reply {
        lines: lines.into_iter().map(String::from).collect(),
        quit: false,
    }
}

/// Ends the program. The session flag is left as it is.
#[must_use]
pub fn quit() -> Reply {
    Reply {
        lines: vec!["Bye.".to_string()],
        quit: true,
    }
}
