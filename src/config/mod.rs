/// Database connection and schema management
pub mod database;

/// Front-end settings from config.toml
pub mod settings;
