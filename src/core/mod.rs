//! Core logic - Stores, session handling and the in-memory item list.
//! Nothing here knows about the terminal front-end.

/// Credential registration and verification
pub mod credential;
/// Item form parsing and price formatting
pub mod form;
/// Item store (CRUD over the `items` table)
pub mod item;
/// In-memory item list kept in step with the store via positional deltas
pub mod item_list;
/// Persisted session flag and the session context
pub mod session;
