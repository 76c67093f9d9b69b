// Copyright 2023 Remi Bernotavicius

use crate::{Error, Result};
use diesel::prelude::Connection as _;
use diesel::RunQueryDsl as _;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::path::Path;

pub mod models;
pub mod query;
pub mod schema;

pub type Connection = diesel::sqlite::SqliteConnection;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Opens (creating if needed) the SQLite database at `path` and brings its schema up to date.
/// Passing `":memory:"` gives a private in-memory database.
pub fn establish_connection(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    let url = path
        .to_str()
        .ok_or_else(|| Error::Other(format!("database path {path:?} is not valid UTF-8")))?;
    let mut connection = Connection::establish(url)?;
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut connection)?;
    connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(Error::Migration)?;
    log::debug!("opened database {url}");
    Ok(connection)
}

#[cfg(test)]
pub fn test_connection() -> Connection {
    establish_connection(":memory:").unwrap()
}

#[test]
fn migrations() {
    let mut conn = test_connection();
    conn.revert_all_migrations(MIGRATIONS).unwrap();
    conn.run_pending_migrations(MIGRATIONS).unwrap();
    assert!(!conn.has_pending_migration(MIGRATIONS).unwrap());
}
